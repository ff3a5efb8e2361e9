//! Parsing of ranking and score-map input files.
//!
//! Both formats are auto-detected: JSON when the content starts with `[` or
//! `{`, plain text otherwise.
use std::collections::HashMap;

use rbo_core::RankItem;
use serde::Deserialize;

/// One JSON array element: a single item or a tie.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonRank {
    Single(String),
    Tied(Vec<String>),
}

/// Parse a ranking, best rank first.
///
/// JSON: an array whose elements are strings or arrays of strings (a tie).
/// Plain text: one rank per line, tied items on one line separated by tabs.
/// Blank lines and blank items are skipped.
pub fn parse_ranking(content: &str) -> Result<Vec<RankItem<String>>, String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        let ranks: Vec<JsonRank> = serde_json::from_str(trimmed).map_err(|e| {
            format!("Looks like JSON but failed to parse as a ranking (strings or arrays of strings): {e}")
        })?;
        Ok(ranks
            .into_iter()
            .filter_map(|rank| match rank {
                JsonRank::Single(item) => rank_from_members(vec![item]),
                JsonRank::Tied(items) => rank_from_members(items),
            })
            .collect())
    } else {
        Ok(trimmed
            .lines()
            .filter_map(|line| rank_from_members(line.split('\t').map(str::to_string).collect()))
            .collect())
    }
}

fn rank_from_members(members: Vec<String>) -> Option<RankItem<String>> {
    let members: Vec<String> = members
        .into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();
    if members.is_empty() {
        None
    } else {
        Some(RankItem::tied(members))
    }
}

/// Parse an `item -> score` map.
///
/// JSON: an object whose values are numbers. Plain text: one `item score`
/// pair per line, the score being the last whitespace-separated field.
/// A non-numeric score is an error; so is an item listed twice.
pub fn parse_scores(content: &str) -> Result<HashMap<String, f64>, String> {
    let trimmed = content.trim();
    let mut scores = HashMap::new();

    if trimmed.starts_with('{') {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(trimmed)
            .map_err(|e| format!("Looks like JSON but failed to parse as an object: {e}"))?;
        for (item, value) in object {
            let score = value
                .as_f64()
                .ok_or_else(|| format!("Score for \"{item}\" is not a number: {value}"))?;
            scores.insert(item, score);
        }
        return Ok(scores);
    }

    for (line_no, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (item, score) = line
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| format!("Line {}: expected \"<item> <score>\", got \"{line}\"", line_no + 1))?;
        let item = item.trim();
        let score: f64 = score
            .parse()
            .map_err(|_| format!("Line {}: score for \"{item}\" is not a number: \"{score}\"", line_no + 1))?;
        if score.is_nan() {
            return Err(format!("Line {}: score for \"{item}\" is not a number", line_no + 1));
        }
        if scores.insert(item.to_string(), score).is_some() {
            return Err(format!("Line {}: item \"{item}\" listed twice", line_no + 1));
        }
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(s: &str) -> RankItem<String> {
        RankItem::Single(s.to_string())
    }

    fn tie(items: &[&str]) -> RankItem<String> {
        RankItem::tied(items.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_ranking_json() {
        let ranking = parse_ranking(r#"["a", ["b", "c"], "d"]"#).unwrap();
        assert_eq!(ranking, vec![single("a"), tie(&["b", "c"]), single("d")]);
    }

    #[test]
    fn test_parse_ranking_json_skips_empty() {
        let ranking = parse_ranking(r#"["a", [], " ", ["b"]]"#).unwrap();
        assert_eq!(ranking, vec![single("a"), single("b")]);
    }

    #[test]
    fn test_parse_ranking_json_rejects_numbers() {
        let err = parse_ranking("[1, 2, 3]").unwrap_err();
        assert!(err.contains("failed to parse"), "error was: {err}");
    }

    #[test]
    fn test_parse_ranking_plain_text() {
        let text = "The Matrix\n\nAlien\tAliens\n  Heat  \n";
        let ranking = parse_ranking(text).unwrap();
        assert_eq!(ranking, vec![single("The Matrix"), tie(&["Alien", "Aliens"]), single("Heat")]);
    }

    #[test]
    fn test_parse_scores_json() {
        let scores = parse_scores(r#"{"a": 1, "b": 2.5}"#).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores["a"], 1.0);
        assert_eq!(scores["b"], 2.5);
    }

    #[test]
    fn test_parse_scores_json_non_numeric() {
        let err = parse_scores(r#"{"a": "high"}"#).unwrap_err();
        assert!(err.contains("not a number"), "error was: {err}");
    }

    #[test]
    fn test_parse_scores_plain_text() {
        let scores = parse_scores("Blade Runner 9.5\nHeat\t8\n\n").unwrap();
        assert_eq!(scores["Blade Runner"], 9.5);
        assert_eq!(scores["Heat"], 8.0);
    }

    #[test]
    fn test_parse_scores_plain_text_errors() {
        assert!(parse_scores("lonely").unwrap_err().contains("expected"));
        assert!(parse_scores("a high").unwrap_err().contains("not a number"));
        assert!(parse_scores("a NaN").unwrap_err().contains("not a number"));
        assert!(parse_scores("a 1\na 2").unwrap_err().contains("listed twice"));
    }
}
