//! Friendship graph builders

use std::sync::Arc;

use crate::{Person, befriend, person};

/// `count` people, each befriending the next; the last befriends the first
pub fn ring(count: u32) -> Vec<Arc<Person>> {
	let people = crowd(count);
	for (index, current) in people.iter().enumerate() {
		let next = &people[(index + 1) % people.len()];
		befriend(current, &[next]);
	}
	people
}

/// `count` people where everyone befriends everyone, themselves included
pub fn clique(count: u32) -> Vec<Arc<Person>> {
	let people = crowd(count);
	let everyone: Vec<&Arc<Person>> = people.iter().collect();
	for current in &people {
		befriend(current, &everyone);
	}
	people
}

/// `count` people with ids `1..=count` and no friends set
pub fn crowd(count: u32) -> Vec<Arc<Person>> {
	(1..=count)
		.map(|id| person(id, &format!("Person {}", id), 20 + id % 50))
		.collect()
}

/// People `1..=count` whose friends follow `edges`
///
/// Edges are `(from, to)` indices into the returned vector; out of range
/// indices wrap around.
pub fn from_edges(count: u32, edges: &[(usize, usize)]) -> Vec<Arc<Person>> {
	let people = crowd(count);
	for (index, current) in people.iter().enumerate() {
		let friends: Vec<&Arc<Person>> = edges
			.iter()
			.filter(|(from, _)| from % people.len() == index)
			.map(|(_, to)| &people[to % people.len()])
			.collect();
		befriend(current, &friends);
	}
	people
}
