use crate::{
	evaluate, evaluate_with,
	roll::roller::{Iter as IterRoller, Val as ValRoller},
	Error, ErrorKind, Evaluation, Limits, Mode, Terms,
};

#[test]
fn normal_total_in_range() {
	for _ in 0..200 {
		let eval = evaluate("1d20+5", Mode::Normal).unwrap();
		assert!((6..=25).contains(&eval.total()));
		assert_eq!(eval.roll_sets().len(), 1);
		assert_eq!(eval.selected_index(), 0);
		assert_eq!(eval.total(), eval.roll_sets()[0].total());
	}
}

#[test]
fn keeps_expression_and_mode() {
	let eval = evaluate(" 2d6 + 1d4 + 3 ", Mode::Disadvantage).unwrap();
	assert_eq!(eval.expression(), " 2d6 + 1d4 + 3 ");
	assert_eq!(eval.mode(), Mode::Disadvantage);
}

#[test]
fn roll_details_per_term() {
	let eval = evaluate("2d6+1d4+3", Mode::Normal).unwrap();
	let terms = eval.roll_sets()[0].terms();
	assert_eq!(terms.len(), 3);
	assert_eq!(terms[0].rolls.len(), 2);
	assert_eq!(terms[1].rolls.len(), 1);
	assert_eq!(terms[2].rolls.len(), 0);
}

#[test]
fn advantage_selects_higher_total() {
	for _ in 0..200 {
		let eval = evaluate("1d20+5", Mode::Advantage).unwrap();
		assert_eq!(eval.roll_sets().len(), 2);

		let totals = eval.roll_sets().iter().map(|set| set.total()).collect::<Vec<_>>();
		let max = *totals.iter().max().unwrap();
		assert_eq!(eval.total(), max);
		assert_eq!(eval.total(), totals[eval.selected_index()]);
		if totals[0] == totals[1] {
			assert_eq!(eval.selected_index(), 0);
		}
	}
}

#[test]
fn disadvantage_selects_lower_total() {
	for _ in 0..200 {
		let eval = evaluate("1d20+5", Mode::Disadvantage).unwrap();
		assert_eq!(eval.roll_sets().len(), 2);

		let totals = eval.roll_sets().iter().map(|set| set.total()).collect::<Vec<_>>();
		let min = *totals.iter().min().unwrap();
		assert_eq!(eval.total(), min);
		assert_eq!(eval.total(), totals[eval.selected_index()]);
		if totals[0] == totals[1] {
			assert_eq!(eval.selected_index(), 0);
		}
	}
}

#[test]
fn ties_select_first() {
	for mode in [Mode::Advantage, Mode::Disadvantage] {
		let eval = evaluate_with("3d6", mode, &Limits::DEFAULT, &mut ValRoller(4)).unwrap();
		assert_eq!(eval.roll_sets().len(), 2);
		assert_eq!(eval.roll_sets()[0], eval.roll_sets()[1]);
		assert_eq!(eval.selected_index(), 0);
		assert_eq!(eval.total(), 12);
	}
}

#[test]
fn selection_with_preset_rolls() {
	let eval = evaluate_with("1d20+1", Mode::Advantage, &Limits::DEFAULT, &mut IterRoller::new([3, 18])).unwrap();
	assert_eq!(eval.selected_index(), 1);
	assert_eq!(eval.total(), 19);
	assert_eq!(eval.selected(), Some(&eval.roll_sets()[1]));

	let eval = evaluate_with("1d20+1", Mode::Disadvantage, &Limits::DEFAULT, &mut IterRoller::new([3, 18])).unwrap();
	assert_eq!(eval.selected_index(), 0);
	assert_eq!(eval.total(), 4);

	let eval = evaluate_with("1d20+1", Mode::Advantage, &Limits::DEFAULT, &mut IterRoller::new([18, 3])).unwrap();
	assert_eq!(eval.selected_index(), 0);
	assert_eq!(eval.total(), 19);
}

#[test]
fn each_roll_set_draws_fresh_values() {
	let mut roller = IterRoller::new([1, 2, 3, 4]);
	let terms: Terms = "2d6".parse().unwrap();
	let eval = Evaluation::roll("2d6", Mode::Advantage, &terms, &mut roller);
	assert_eq!(eval.roll_sets()[0].terms()[0].rolls, vec![1, 2]);
	assert_eq!(eval.roll_sets()[1].terms()[0].rolls, vec![3, 4]);
	assert!(!roller.can_roll());
}

#[test]
fn parse_errors_propagate() {
	assert_eq!(evaluate("", Mode::Normal).unwrap_err(), Error::EmptyExpression);
	assert_eq!(evaluate("2dd6", Mode::Advantage).unwrap_err().kind(), ErrorKind::SyntaxMismatch);
	assert_eq!(evaluate("0d6", Mode::Normal).unwrap_err().kind(), ErrorKind::InvalidDiceTerm);
	assert_eq!(evaluate("1d0", Mode::Normal).unwrap_err().kind(), ErrorKind::InvalidDiceTerm);
	assert_eq!(evaluate("1d1001", Mode::Normal).unwrap_err().kind(), ErrorKind::DiceSidesExceedLimit);
	assert_eq!(evaluate("51d6+50d6", Mode::Normal).unwrap_err().kind(), ErrorKind::DiceCountExceedsLimit);
}

#[test]
fn mode_selection_rule() {
	assert_eq!(Mode::Normal.select(&[1]), 0);
	assert_eq!(Mode::Advantage.select(&[1, 2]), 1);
	assert_eq!(Mode::Advantage.select(&[2, 1]), 0);
	assert_eq!(Mode::Advantage.select(&[-5, -5]), 0);
	assert_eq!(Mode::Disadvantage.select(&[1, 2]), 0);
	assert_eq!(Mode::Disadvantage.select(&[2, 1]), 1);
	assert_eq!(Mode::Disadvantage.select(&[7, 7]), 0);
	assert_eq!(Mode::Advantage.select(&[]), 0);
}

#[test]
fn mode_names() {
	assert_eq!(Mode::default(), Mode::Normal);
	assert_eq!("normal".parse::<Mode>().unwrap(), Mode::Normal);
	assert_eq!("Advantage".parse::<Mode>().unwrap(), Mode::Advantage);
	assert_eq!("DISADVANTAGE".parse::<Mode>().unwrap(), Mode::Disadvantage);
	assert!("adv".parse::<Mode>().is_err());
	assert_eq!(Mode::Disadvantage.to_string(), "disadvantage");
	assert_eq!(Mode::Normal.roll_count(), 1);
	assert_eq!(Mode::Advantage.roll_count(), 2);
	assert_eq!(Mode::Disadvantage.roll_count(), 2);
}

#[cfg(feature = "serde")]
mod serialization {
	use serde_json::json;

	use crate::{evaluate_with, roll::roller::Iter as IterRoller, Error, Evaluation, Limits, Mode};

	#[test]
	fn evaluation_serializes_for_audit() {
		let eval = evaluate_with("2d6 - 1", Mode::Advantage, &Limits::DEFAULT, &mut IterRoller::new([1, 2, 6, 5])).unwrap();
		let value = serde_json::to_value(&eval).unwrap();

		assert_eq!(
			value,
			json!({
				"expression": "2d6 - 1",
				"mode": "advantage",
				"rollSets": [
					{
						"terms": [
							{ "term": "2d6", "rolls": [1, 2], "termTotal": 3 },
							{ "term": "-1", "rolls": [], "termTotal": -1 },
						],
						"total": 2,
					},
					{
						"terms": [
							{ "term": "2d6", "rolls": [6, 5], "termTotal": 11 },
							{ "term": "-1", "rolls": [], "termTotal": -1 },
						],
						"total": 10,
					},
				],
				"selectedIndex": 1,
				"total": 10,
			})
		);

		let back: Evaluation = serde_json::from_value(value).unwrap();
		assert_eq!(back, eval);
	}

	#[test]
	fn error_details_serialize() {
		let err = "1d6+1d1001".parse::<crate::Terms>().unwrap_err();
		assert!(matches!(err, Error::DiceSidesExceedLimit { .. }));
		assert_eq!(
			serde_json::to_value(err.details()).unwrap(),
			json!({
				"field": "expression",
				"kind": "DICE_SIDES_EXCEED_LIMIT",
				"token": "+1d1001",
				"span": { "start": 3, "end": 10 },
			})
		);
	}

	#[test]
	fn limits_deserialize_clamped() {
		let limits: Limits = serde_json::from_value(json!({ "maxSides": 20, "maxDice": 5000 })).unwrap();
		assert_eq!(limits, Limits::DEFAULT.with_max_sides(20));
		assert_eq!(limits.max_dice(), 100);
		assert_eq!(
			serde_json::to_value(limits).unwrap(),
			json!({ "maxTerms": 20, "maxSides": 20, "maxDice": 100 })
		);
	}

	#[test]
	fn terms_serialize_tagged() {
		let terms = "-2d8+3".parse::<crate::Terms>().unwrap();
		assert_eq!(
			serde_json::to_value(&terms).unwrap(),
			json!([
				{ "kind": "dice", "sign": "minus", "count": 2, "sides": 8, "raw": "-2d8" },
				{ "kind": "const", "sign": "plus", "value": 3, "raw": "+3" },
			])
		);
	}
}
