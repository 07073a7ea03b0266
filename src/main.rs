// Copyright (c) 2022 Bastiaan Marinus van de Weerd


mod burrow;

fn main() {
	use std::io::Read as _;

	let mut input = String::new();
	std::io::stdin().read_to_string(&mut input).unwrap();

	match burrow::min_energy_for_str(&input) {
		Some(energy) => println!("{energy}"),
		None => {
			eprintln!("No sequence of moves organizes the amphipods");
			std::process::exit(1)
		}
	}
}
