#![feature(test)]

extern crate test;

use fairroll::{
	roll::{
		roller::{Roller, Secure, Val},
		Describe,
	},
	Terms,
};
use test::Bencher;

#[bench]
fn roll_4d8(b: &mut Bencher) {
	let terms: Terms = "4d8".parse().unwrap();
	let mut roller = Secure::default();
	b.iter(|| roller.roll(&terms));
}

#[bench]
fn roll_100d20(b: &mut Bencher) {
	let terms: Terms = "100d20".parse().unwrap();
	let mut roller = Secure::default();
	b.iter(|| roller.roll(&terms));
}

#[bench]
fn roll_100d1000_constant_roller(b: &mut Bencher) {
	let terms: Terms = "100d1000".parse().unwrap();
	let mut roller = Val(500);
	b.iter(|| roller.roll(&terms));
}

#[bench]
fn roll_mixed(b: &mut Bencher) {
	let terms: Terms = "2d6 + 1d4 - 3d8 + 5 - 1d20 + 4d10".parse().unwrap();
	let mut roller = Secure::default();
	b.iter(|| roller.roll(&terms).total());
}

#[bench]
fn describe_mixed(b: &mut Bencher) {
	let terms: Terms = "2d6 + 1d4 - 3d8 + 5 - 1d20 + 4d10".parse().unwrap();
	let rolled = Val(3).roll(&terms);
	b.iter(|| rolled.describe(None));
}
