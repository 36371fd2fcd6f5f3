//! Parsing and re-rendering of the wiki bracket markup.
//!
//! The results section of a cup page is semi-structured wikitext: a bracket
//! template declaring its size, followed by one match block per (round,
//! slot). The parser extracts every block into a [`MatchBlock`]; the
//! renderer reproduces the exact source grammar so that splicing merged
//! blocks back leaves every untouched byte of the page identical.

use std::ops::Range;

use lazy_regex::{regex, regex_captures, Regex};

use crate::bracket::rounds_for;
use crate::{Error, Result};

/// The free-text fields of one opponent in a match block.
///
/// `flag` and `race` are either empty or a full bracketed annotation
/// (`|flag=fi`, `|race=z`) so they can be re-rendered verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpponentFields {
    pub name: String,
    pub flag: String,
    pub race: String,
    pub score: String,
}

/// One parsed match block of the results section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchBlock {
    span: Range<usize>,
    pub round: u64,
    pub slot: u64,
    pub bestof: String,
    pub opponents: [OpponentFields; 2],
}

impl MatchBlock {
    /// Returns the byte range of the block within the section it was parsed
    /// from.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Renders the block back into the source grammar.
    pub fn render(&self) -> String {
        let [o1, o2] = &self.opponents;

        format!(
            "|R{}M{}={}\n    \
             |opponent1={{{{1v1Opponent|1={}{}{}|score={}}}}}\n    \
             |opponent2={{{{1v1Opponent|1={}{}{}|score={}}}}}\n\
             }}}}",
            self.round,
            self.slot,
            self.bestof,
            o1.name,
            o1.flag,
            o1.race,
            o1.score,
            o2.name,
            o2.flag,
            o2.race,
            o2.score,
        )
    }
}

/// Derives the number of wiki rounds from the `|Bracket/<size>|` token.
///
/// # Errors
///
/// Returns [`Error::BracketSizeNotFound`] if the token is absent, in which
/// case the kind of bracket on the page cannot be determined.
pub fn bracket_rounds(text: &str) -> Result<u64> {
    let (_, size) = regex_captures!(r"\|Bracket/(\d+)\|", text).ok_or(Error::BracketSizeNotFound)?;
    let size = size.parse().map_err(|_| Error::BracketSizeNotFound)?;

    Ok(rounds_for(size))
}

/// Parses every match block of the section.
///
/// The round range of the block pattern tops out at `n_wiki_rounds - 2`.
/// That bound mirrors the bracket template's own numbering, where the
/// maximum round token equals `n_wiki_rounds - 2`; it is a contract of the
/// block format, not a value to derive differently.
pub fn match_blocks(text: &str, n_wiki_rounds: u64) -> Result<Vec<MatchBlock>> {
    let pattern = block_pattern(n_wiki_rounds)?;

    let mut blocks = Vec::new();
    for cap in pattern.captures_iter(text) {
        let opponent = |name: &str, flag: &str, race: &str, score: &str| OpponentFields {
            name: cap[name].to_owned(),
            flag: cap[flag].to_owned(),
            race: cap[race].to_owned(),
            score: cap[score].to_owned(),
        };

        blocks.push(MatchBlock {
            span: cap.get(0).unwrap().range(),
            round: cap["round"].parse().unwrap(),
            slot: cap["slot"].parse().unwrap(),
            bestof: cap["bestof"].to_owned(),
            opponents: [
                opponent("n1", "f1", "r1", "s1"),
                opponent("n2", "f2", "r2", "s2"),
            ],
        });
    }

    log::debug!("parsed {} match blocks", blocks.len());

    Ok(blocks)
}

fn block_pattern(n_wiki_rounds: u64) -> Result<Regex> {
    let max = n_wiki_rounds as i64 - 2;

    let pattern = format!(
        r"\|R(?P<round>[1-{max}])M(?P<slot>\d+)=(?P<bestof>\{{\{{Match(\|bestof=\d)?)
    \|opponent1=\{{\{{1v1Opponent\|1=(?P<n1>[a-zA-Z0-9_]*)(?P<f1>(\|flag=[a-z]+)?)(?P<r1>(\|race=[tzp])?)\|score=(?P<s1>[0-2]*)\}}\}}
    \|opponent2=\{{\{{1v1Opponent\|1=(?P<n2>[a-zA-Z0-9_]*)(?P<f2>(\|flag=[a-z]+)?)(?P<r2>(\|race=[tzp])?)\|score=(?P<s2>[0-2]*)\}}\}}
\}}\}}"
    );

    Regex::new(&pattern).map_err(|err| Error::BlockPattern(err.to_string()))
}

/// Applies `edits` to `text`, replacing each byte range with its new
/// content. Spans must be non-overlapping and in ascending order, which is
/// what [`match_blocks`] produces.
pub fn splice(text: &str, edits: Vec<(Range<usize>, String)>) -> String {
    let mut out = text.to_owned();

    for (span, replacement) in edits.into_iter().rev() {
        out.replace_range(span, &replacement);
    }

    out
}

/// Replaces the participant table block with the given entry lines, leaving
/// the rest of the section untouched.
pub fn replace_participant_table(section: &str, entries: &[String]) -> String {
    let table = format!("{{{{ParticipantTable\n{}\n}}}}", entries.join("\n"));

    let edits = regex!(r"(?s)\{\{ParticipantTable.*\}\}")
        .find_iter(section)
        .map(|found| (found.range(), table.clone()))
        .collect();

    splice(section, edits)
}

#[cfg(test)]
mod tests {
    use super::{bracket_rounds, match_blocks, replace_participant_table, splice};
    use crate::Error;

    const SECTION: &str = "{{Bracket|Bracket/16|hideroundtitles=true\n\
        |R1M1={{Match\n    \
        |opponent1={{1v1Opponent|1=Maru|flag=kr|race=t|score=2}}\n    \
        |opponent2={{1v1Opponent|1=|score=}}\n\
        }}\n\
        |R1M2={{Match|bestof=3\n    \
        |opponent1={{1v1Opponent|1=|score=}}\n    \
        |opponent2={{1v1Opponent|1=Clem|flag=fr|score=}}\n\
        }}\n\
        }}\n";

    #[test]
    fn test_bracket_rounds() {
        assert_eq!(bracket_rounds(SECTION).unwrap(), 4);
        assert_eq!(bracket_rounds("|Bracket/64|").unwrap(), 6);

        assert_eq!(
            bracket_rounds("no bracket here").unwrap_err(),
            Error::BracketSizeNotFound
        );
    }

    #[test]
    fn test_parse_fields() {
        let blocks = match_blocks(SECTION, 4).unwrap();
        assert_eq!(blocks.len(), 2);

        let first = &blocks[0];
        assert_eq!((first.round, first.slot), (1, 1));
        assert_eq!(first.bestof, "{{Match");
        assert_eq!(first.opponents[0].name, "Maru");
        assert_eq!(first.opponents[0].flag, "|flag=kr");
        assert_eq!(first.opponents[0].race, "|race=t");
        assert_eq!(first.opponents[0].score, "2");
        assert_eq!(first.opponents[1].name, "");
        assert_eq!(first.opponents[1].score, "");

        let second = &blocks[1];
        assert_eq!(second.bestof, "{{Match|bestof=3");
        assert_eq!(second.opponents[1].flag, "|flag=fr");
        assert_eq!(second.opponents[1].race, "");
    }

    #[test]
    fn test_render_round_trips() {
        let blocks = match_blocks(SECTION, 4).unwrap();

        for block in blocks {
            assert_eq!(block.render(), &SECTION[block.span()]);
        }
    }

    #[test]
    fn test_round_range_bound() {
        // A 16 bracket matches round tokens 1 and 2 only; R3 blocks are left
        // for the bracket template's later rounds.
        let r3 = SECTION.replace("R1M", "R3M");
        assert!(match_blocks(&r3, 4).unwrap().is_empty());
    }

    #[test]
    fn test_splice() {
        let text = "aaa bbb ccc";
        let out = splice(
            text,
            vec![(0..3, "xxx".to_owned()), (8..11, "yy".to_owned())],
        );
        assert_eq!(out, "xxx bbb yy");
    }

    #[test]
    fn test_replace_participant_table() {
        let section = "pre\n{{ParticipantTable\n|p1=Old\n}}\npost";
        let entries = vec!["|p1=New".to_owned(), "|p2=Other|p2link=Other page".to_owned()];

        assert_eq!(
            replace_participant_table(section, &entries),
            "pre\n{{ParticipantTable\n|p1=New\n|p2=Other|p2link=Other page\n}}\npost"
        );
    }
}
