//! Invariants of the ranked table under arbitrary insertions.

use proptest::prelude::*;
use sco_rs::prelude::*;

fn arb_inserts() -> impl Strategy<Value = Vec<(String, u32)>> {
    prop::collection::vec(("[a-zA-Z ]{0,8}", 0..=SCORE_MAX), 0..40)
}

proptest! {
    #[test]
    fn table_stays_descending_and_bounded(inserts in arb_inserts()) {
        let mut hiscore = SongHiscore::new("unused", DEFAULT_FILE_NAME);
        for (name, score) in inserts {
            let before = hiscore.entries().to_vec();
            let rank = hiscore.add_new_hiscore(name.clone(), score);
            prop_assert!(hiscore.len() <= MAX_ENTRIES);
            prop_assert!(hiscore.entries().windows(2).all(|w| w[0].score >= w[1].score));
            if name.is_empty() {
                prop_assert_eq!(rank, None);
                prop_assert_eq!(hiscore.entries(), before.as_slice());
            } else if let Some(rank) = rank {
                prop_assert_eq!(&hiscore.entries()[rank], &HiscoreEntry::new(name, score));
            }
        }
    }

    #[test]
    fn ties_keep_insertion_order(count in 1usize..=MAX_ENTRIES, score in 0..=SCORE_MAX) {
        let mut hiscore = SongHiscore::new("unused", DEFAULT_FILE_NAME);
        for i in 0..count {
            prop_assert_eq!(hiscore.add_new_hiscore(format!("p{i}"), score), Some(i));
        }
        let names: Vec<_> = hiscore.entries().iter().map(|e| e.name.clone()).collect();
        let expected: Vec<_> = (0..count).map(|i| format!("p{i}")).collect();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn qualification_threshold(mut scores in prop::collection::vec(0..=SCORE_MAX, 3..=MAX_ENTRIES)) {
        let mut hiscore = SongHiscore::new("unused", DEFAULT_FILE_NAME);
        for (i, &score) in scores.iter().enumerate() {
            hiscore.add_new_hiscore(format!("p{i}"), score);
        }
        scores.sort_unstable_by(|a, b| b.cmp(a));
        let third = scores[2];
        prop_assert!(!hiscore.reached_new_hiscore(third));
        prop_assert_eq!(hiscore.reached_new_hiscore(third + 1), third + 1 >= MIN_QUALIFYING_SCORE);
        prop_assert!(!hiscore.reached_new_hiscore(MIN_QUALIFYING_SCORE - 1));
    }

    #[test]
    fn text_roundtrip(entries in prop::collection::vec(("[^\r\n]{1,12}", 0..=SCORE_MAX), 0..=MAX_ENTRIES)) {
        let mut hiscore = SongHiscore::new("unused", DEFAULT_FILE_NAME);
        for (name, score) in entries {
            hiscore.add_new_hiscore(name, score);
        }
        let text = unparse_sco(hiscore.entries());
        prop_assert_eq!(parse_sco(&text).unwrap(), hiscore.entries().to_vec());
    }
}

#[test]
fn fewer_than_three_entries_compare_with_zero() {
    let mut hiscore = SongHiscore::new("unused", DEFAULT_FILE_NAME);
    assert!(hiscore.reached_new_hiscore(MIN_QUALIFYING_SCORE));
    hiscore.add_new_hiscore("a", 9000);
    hiscore.add_new_hiscore("b", 8000);
    assert!(hiscore.reached_new_hiscore(MIN_QUALIFYING_SCORE));
    assert!(!hiscore.reached_new_hiscore(MIN_QUALIFYING_SCORE - 1));
}
