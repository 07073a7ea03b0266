// Copyright (c) 2022 Bastiaan Marinus van de Weerd


const HALLWAY_LEN: usize = 11;
const NUM_ROOMS: usize = 4;

#[cfg_attr(test, derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Amphipod { Amber, Bronze, Copper, Desert }

impl Amphipod {
	fn for_room(room: usize) -> Self {
		use Amphipod::*;
		match room { 0 => Amber, 1 => Bronze, 2 => Copper, 3 => Desert, _ => panic!("Invalid room {room}") }
	}

	fn home_room(&self) -> usize {
		*self as usize
	}

	fn step_energy(&self) -> usize {
		10_usize.pow(*self as u32)
	}
}

const fn room_entrance(room: usize) -> usize {
	2 + 2 * room
}

fn is_room_entrance(pos: usize) -> bool {
	(0..NUM_ROOMS).any(|room| room_entrance(room) == pos)
}


/// Room cells are ordered top-down; amphipods settle into the deepest empty cell.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Burrow<const DEPTH: usize> {
	hallway: [Option<Amphipod>; HALLWAY_LEN],
	rooms: [[Option<Amphipod>; DEPTH]; NUM_ROOMS],
}

impl<const DEPTH: usize> Burrow<DEPTH> {
	fn is_organized(&self) -> bool {
		self.rooms.iter().enumerate().all(|(room, cells)|
			cells.iter().all(|cell| *cell == Some(Amphipod::for_room(room))))
	}

	// A settled room holds only its own type; none of its occupants ever move again.
	fn is_settled(&self, room: usize) -> bool {
		self.rooms[room].iter().flatten().all(|amphipod| amphipod.home_room() == room)
	}

	fn accepts(&self, amphipod: Amphipod) -> bool {
		self.rooms[amphipod.home_room()].iter().flatten().all(|occupant| *occupant == amphipod)
	}

	// Whether the hallway between `from` (exclusive) and `to` (inclusive) is unoccupied.
	fn hallway_clear(&self, from: usize, to: usize) -> bool {
		let path = if from < to { from + 1..=to } else { to..=from - 1 };
		self.hallway[path].iter().all(Option::is_none)
	}

	// Returns an iterator over moves out of rooms, as resulting burrows and energy spent.
	fn exit_moves(&self) -> impl Iterator<Item = (Self, usize)> + '_ {
		(0..NUM_ROOMS)
			.filter_map(move |room| {
				if self.is_settled(room) { return None }
				let (depth, amphipod) = self.rooms[room].iter()
					.enumerate()
					.find_map(|(depth, cell)| cell.map(|amphipod| (depth, amphipod)))?;
				Some((room, depth, amphipod))
			})
			.flat_map(move |(room, depth, amphipod)| {
				let entrance = room_entrance(room);
				(0..entrance).rev().take_while(move |&pos| self.hallway[pos].is_none())
					.chain((entrance + 1..HALLWAY_LEN)
						.take_while(move |&pos| self.hallway[pos].is_none()))
					.filter(|&pos| !is_room_entrance(pos))
					.map(move |pos| {
						let mut next = *self;
						next.hallway[pos] = Some(amphipod);
						next.rooms[room][depth] = None;
						(next, (entrance.abs_diff(pos) + depth + 1) * amphipod.step_energy())
					})
			})
	}

	// Returns an iterator over moves from the hallway into home rooms.
	fn entry_moves(&self) -> impl Iterator<Item = (Self, usize)> + '_ {
		self.hallway.iter()
			.enumerate()
			.filter_map(|(pos, cell)| cell.map(|amphipod| (pos, amphipod)))
			.filter_map(move |(pos, amphipod)| {
				if !self.accepts(amphipod) { return None }
				let room = amphipod.home_room();
				let entrance = room_entrance(room);
				if !self.hallway_clear(pos, entrance) { return None }
				let depth = self.rooms[room].iter().rposition(Option::is_none)?;
				let mut next = *self;
				next.hallway[pos] = None;
				next.rooms[room][depth] = Some(amphipod);
				Some((next, (entrance.abs_diff(pos) + depth + 1) * amphipod.step_energy()))
			})
	}

	fn moves(&self) -> impl Iterator<Item = (Self, usize)> + '_ {
		self.exit_moves().chain(self.entry_moves())
	}

	fn min_energy(self) -> Option<usize> {
		use std::collections::{BinaryHeap, HashMap, hash_map::Entry::*};

		// Dijkstra

		#[derive(PartialEq, Eq)]
		struct State<const D: usize> {
			energy: usize,
			burrow: Burrow<D>,
		}

		impl<const D: usize> Ord for State<D> {
			fn cmp(&self, other: &Self) -> std::cmp::Ordering {
				other.energy.cmp(&self.energy)
					.then_with(|| self.burrow.cmp(&other.burrow))
			}
		}

		impl<const D: usize> PartialOrd for State<D> {
			fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
				Some(self.cmp(other))
			}
		}

		let mut heap = BinaryHeap::new();
		let mut found = HashMap::new();
		heap.push(State { energy: 0, burrow: self });
		found.insert(self, 0);

		while let Some(State { energy, burrow }) = heap.pop() {
			// Superseded by a cheaper path found after this entry was pushed
			if found.get(&burrow).map_or(false, |&best| energy > best) { continue }

			if burrow.is_organized() { return Some(energy) }

			#[cfg(LOGGING)]
			println!("{energy} (frontier: {}):\n{burrow}", heap.len());

			for (next, move_energy) in burrow.moves() {
				let next_energy = energy + move_energy;
				match found.entry(next) {
					Occupied(mut entry) => {
						if next_energy >= *entry.get() { continue }
						*entry.get_mut() = next_energy;
					}
					Vacant(entry) => { entry.insert(next_energy); }
				}
				heap.push(State { energy: next_energy, burrow: next });
			}
		}

		None
	}
}

#[cfg(any(test, LOGGING))]
impl<const DEPTH: usize> std::fmt::Display for Burrow<DEPTH> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use std::fmt::Write;

		fn cell_char(cell: Option<Amphipod>) -> char {
			cell.map_or('.', |amphipod| (b'A' + amphipod.home_room() as u8) as char)
		}

		f.write_str("#############\n#")?;
		for cell in self.hallway { f.write_char(cell_char(cell))?; }
		f.write_char('#')?;
		for depth in 0..DEPTH {
			f.write_str(if depth == 0 { "\n##" } else { "\n  " })?;
			for room in 0..NUM_ROOMS {
				f.write_char('#')?;
				f.write_char(cell_char(self.rooms[room][depth]))?;
			}
			f.write_str(if depth == 0 { "###" } else { "#" })?;
		}
		f.write_str("\n  #########")
	}
}


enum Diagram {
	Folded(Burrow<2>),
	Unfolded(Burrow<4>),
}

impl Diagram {
	fn min_energy(self) -> Option<usize> {
		match self {
			Diagram::Folded(burrow) => burrow.min_energy(),
			Diagram::Unfolded(burrow) => burrow.min_energy(),
		}
	}
}


fn input_diagram_for_str(s: &str) -> Diagram {
	s.parse().unwrap()
}

pub(crate) fn min_energy_for_str(s: &str) -> Option<usize> {
	input_diagram_for_str(s).min_energy()
}


mod parsing {
	use std::str::FromStr;
	use super::{Amphipod, Burrow, Diagram, HALLWAY_LEN, NUM_ROOMS, room_entrance};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum DiagramError {
		Shape { lines: usize },
		Format { line: usize, expected: &'static str },
		Cell { line: usize, column: usize, found: char },
		Census { amphipod: char, found: usize },
	}

	fn cell(b: u8) -> Result<Option<Amphipod>, char> {
		match b {
			b'.' => Ok(None),
			b'A'..=b'D' => Ok(Some(Amphipod::for_room((b - b'A') as usize))),
			found => Err(found as char),
		}
	}

	impl<const DEPTH: usize> FromStr for Burrow<DEPTH> {
		type Err = DiagramError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			use {itertools::Itertools as _, DiagramError::*};

			const TOP: &str = "#############";
			const BOTTOM: &str = "  #########";

			let lines = s.lines().collect::<Vec<_>>();
			if lines.len() != DEPTH + 3 { return Err(Shape { lines: lines.len() }) }
			if lines[0].trim_end() != TOP { return Err(Format { line: 1, expected: TOP }) }

			let mut burrow = Burrow { hallway: [None; HALLWAY_LEN], rooms: [[None; DEPTH]; NUM_ROOMS] };

			let hallway = lines[1].trim_end().as_bytes();
			if hallway.len() != HALLWAY_LEN + 2
					|| hallway[0] != b'#' || hallway[HALLWAY_LEN + 1] != b'#' {
				return Err(Format { line: 2, expected: "#<hallway>#" })
			}
			for pos in 0..HALLWAY_LEN {
				burrow.hallway[pos] = cell(hallway[pos + 1])
					.map_err(|found| Cell { line: 2, column: pos + 2, found })?;
			}

			for depth in 0..DEPTH {
				let line = depth + 2;
				let expected = if depth == 0 { "###.#.#.#.###" } else { "  #.#.#.#.#" };
				let row = lines[line].trim_end();
				if row.len() != expected.len()
						|| row.bytes().zip(expected.bytes())
							.any(|(found, frame)| frame != b'.' && found != frame) {
					return Err(Format { line: line + 1, expected })
				}
				for room in 0..NUM_ROOMS {
					// Room cells sit one column right of their hallway entrance
					let column = room_entrance(room) + 1;
					burrow.rooms[room][depth] = cell(row.as_bytes()[column])
						.map_err(|found| Cell { line: line + 1, column: column + 1, found })?;
				}
			}

			if lines[DEPTH + 2].trim_end() != BOTTOM {
				return Err(Format { line: DEPTH + 3, expected: BOTTOM })
			}

			let counts = burrow.hallway.iter().copied()
				.chain(burrow.rooms.iter().flatten().copied())
				.flatten()
				.counts();
			for room in 0..NUM_ROOMS {
				let found = counts.get(&Amphipod::for_room(room)).copied().unwrap_or(0);
				if found != DEPTH {
					return Err(Census { amphipod: (b'A' + room as u8) as char, found })
				}
			}

			Ok(burrow)
		}
	}

	impl FromStr for Diagram {
		type Err = DiagramError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			match s.lines().count() {
				5 => s.parse().map(Diagram::Folded),
				7 => s.parse().map(Diagram::Unfolded),
				lines => Err(DiagramError::Shape { lines }),
			}
		}
	}
}


#[cfg(test)]
mod tests {
	use {indoc::indoc, super::*};

	const FOLDED: &str = indoc! { "
		#############
		#...........#
		###B#C#B#D###
		  #A#D#C#A#
		  #########
	" };

	const UNFOLDED: &str = indoc! { "
		#############
		#...........#
		###B#C#B#D###
		  #D#C#B#A#
		  #D#B#A#C#
		  #A#D#C#A#
		  #########
	" };

	#[test]
	fn parsing() {
		use Amphipod::*;
		let Diagram::Folded(burrow) = FOLDED.parse().unwrap()
			else { panic!("Expected a folded diagram") };
		assert_eq!(burrow.hallway, [None; HALLWAY_LEN]);
		assert_eq!(burrow.rooms, [
			[Some(Bronze), Some(Amber)],
			[Some(Copper), Some(Desert)],
			[Some(Bronze), Some(Copper)],
			[Some(Desert), Some(Amber)],
		]);
		assert!(matches!(UNFOLDED.parse::<Diagram>(), Ok(Diagram::Unfolded(_))));
		assert_eq!(burrow.to_string(), FOLDED.trim_end());
	}

	#[test]
	fn parsing_errors() {
		use super::parsing::DiagramError::*;
		assert!(matches!("#####\n".parse::<Diagram>(), Err(Shape { lines: 1 })));
		assert!(matches!(FOLDED.replacen('#', "?", 1).parse::<Diagram>(),
			Err(Format { line: 1, .. })));
		assert!(matches!(FOLDED.replace('C', "E").parse::<Diagram>(),
			Err(Cell { line: 3, column: 6, found: 'E' })));
		assert!(matches!(FOLDED.replace("#A#D", "#A#A").parse::<Diagram>(),
			Err(Census { amphipod: 'A', found: 3 })));
	}

	#[test]
	fn moves() {
		use itertools::Itertools as _;

		let Diagram::Folded(burrow) = FOLDED.parse().unwrap()
			else { panic!("Expected a folded diagram") };

		// All four rooms are unsettled; each topmost amphipod can park at
		// any of the 7 non-entrance hallway cells of the empty hallway.
		let moves = burrow.moves().collect::<Vec<_>>();
		assert_eq!(moves.len(), 28);

		let census = |burrow: &Burrow<2>| burrow.hallway.iter().copied()
			.chain(burrow.rooms.iter().flatten().copied())
			.flatten()
			.counts();
		for (next, energy) in &moves {
			assert!(*energy > 0);
			assert_eq!(census(next), census(&burrow));
			assert!((0..NUM_ROOMS).all(|room| next.hallway[room_entrance(room)].is_none()));
		}
	}

	#[test]
	fn settled_rooms_stay_put() {
		use Amphipod::*;
		let burrow = Burrow::<2> {
			hallway: {
				let mut hallway = [None; HALLWAY_LEN];
				hallway[0] = Some(Amber);
				hallway
			},
			rooms: [
				[None, Some(Amber)],
				[Some(Bronze), Some(Bronze)],
				[Some(Copper), Some(Copper)],
				[Some(Desert), Some(Desert)],
			],
		};
		assert!(burrow.exit_moves().next().is_none());
		assert_eq!(burrow.min_energy(), Some(3));
	}

	#[test]
	fn deadlock() {
		use Amphipod::*;
		let burrow = Burrow::<2> {
			hallway: {
				let mut hallway = [None; HALLWAY_LEN];
				hallway[3] = Some(Desert);
				hallway[5] = Some(Amber);
				hallway
			},
			rooms: [
				[None, Some(Amber)],
				[Some(Bronze), Some(Bronze)],
				[Some(Copper), Some(Copper)],
				[None, Some(Desert)],
			],
		};
		assert_eq!(burrow.min_energy(), None);
	}

	#[test]
	fn already_organized() {
		let organized = indoc! { "
			#############
			#...........#
			###A#B#C#D###
			  #A#B#C#D#
			  #########
		" };
		assert_eq!(min_energy_for_str(organized), Some(0));
	}

	#[test]
	fn single_displaced() {
		let displaced = indoc! { "
			#############
			#...B.......#
			###A#.#C#D###
			  #A#B#C#D#
			  #########
		" };
		assert_eq!(min_energy_for_str(displaced), Some(20));
	}

	#[test]
	fn min_energy() {
		assert_eq!(min_energy_for_str(FOLDED), Some(12521));
	}

	#[test]
	fn min_energy_unfolded() {
		assert_eq!(min_energy_for_str(UNFOLDED), Some(44169));
	}
}
