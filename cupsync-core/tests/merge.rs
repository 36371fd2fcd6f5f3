use cupsync_core::merge::merge_results_section;
use cupsync_core::{Match, Player, Results, Roster};

fn roster() -> Roster {
    Roster::from_reader(
        "id,name,link,race,flag,notable\n\
         1,Serral,,z,fi,1\n\
         2,Maru,,t,kr,1\n\
         3,Clem,,t,fr,1\n\
         4,MaxPax,MaxPax (Danish player),p,dk,1\n"
            .as_bytes(),
    )
    .unwrap()
}

fn player(id: u64, name: &str) -> Option<Player> {
    Some(Player::new(id, name.to_owned()))
}

// A 16 bracket: 4 wiki rounds, match blocks for rounds 1 and 2. The league
// ran 5 rounds (a 17..32 field), so wiki round r is league round r.
const SECTION: &str = "{{Bracket|Bracket/16|hideroundtitles=true\n\
    |R1M1={{Match\n    \
    |opponent1={{1v1Opponent|1=|score=}}\n    \
    |opponent2={{1v1Opponent|1=|score=}}\n\
    }}\n\
    |R1M2={{Match|bestof=3\n    \
    |opponent1={{1v1Opponent|1=Clem|flag=be|score=}}\n    \
    |opponent2={{1v1Opponent|1=|score=}}\n\
    }}\n\
    |R2M1={{Match\n    \
    |opponent1={{1v1Opponent|1=|score=}}\n    \
    |opponent2={{1v1Opponent|1=|score=}}\n\
    }}\n\
    }}\n";

fn results() -> Results {
    [
        // Forfeit: Serral advances over an unknown newcomer.
        (
            1,
            1,
            Match::new([player(1, "serral_acc"), player(77, "newcomer")], [1, 0]),
        ),
        // Decided best-of-3.
        (
            1,
            2,
            Match::new([player(3, "clem_acc"), player(2, "maru_acc")], [2, 1]),
        ),
        // Not yet played.
        (2, 1, Match::new([player(4, "maxpax_acc"), None], [0, 0])),
    ]
    .into_iter()
    .collect()
}

#[test]
fn merge_fills_empty_fields_and_preserves_page_edits() {
    let merged = merge_results_section(SECTION, 5, &results(), &roster()).unwrap();

    // Forfeit: W/FF plus roster name/flag/race for both known slots; the
    // unknown player keeps the raw league name with no annotations.
    assert!(merged.contains(
        "|R1M1={{Match\n    \
         |opponent1={{1v1Opponent|1=Serral|flag=fi|race=z|score=W}}\n    \
         |opponent2={{1v1Opponent|1=newcomer|score=FF}}\n\
         }}"
    ));

    // The page already said Clem is Belgian; that edit wins over the
    // roster's fr, while the empty race and score still fill in.
    assert!(merged.contains(
        "|R1M2={{Match|bestof=3\n    \
         |opponent1={{1v1Opponent|1=Clem|flag=be|race=t|score=2}}\n    \
         |opponent2={{1v1Opponent|1=Maru|flag=kr|race=t|score=1}}\n\
         }}"
    ));

    // Undecided: names fill, scores stay empty, the bye slot stays empty.
    assert!(merged.contains(
        "|R2M1={{Match\n    \
         |opponent1={{1v1Opponent|1=MaxPax|flag=dk|race=p|score=}}\n    \
         |opponent2={{1v1Opponent|1=|score=}}\n\
         }}"
    ));

    // Text outside the match blocks is untouched.
    assert!(merged.starts_with("{{Bracket|Bracket/16|hideroundtitles=true\n"));
    assert!(merged.ends_with("}}\n}}\n"));
}

#[test]
fn merge_is_idempotent() {
    let once = merge_results_section(SECTION, 5, &results(), &roster()).unwrap();
    let twice = merge_results_section(&once, 5, &results(), &roster()).unwrap();

    assert_eq!(once, twice);
}
