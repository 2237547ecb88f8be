//! The score (instructions) document.
//!
//! Besides the title, the score holds a table telling players how a group of a
//! given size splits into parties of 3, 4, or 5.

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::document::{escape_latex, DocumentRenderer};

/// Sizes a party may have.
pub const PARTY_SIZES: [usize; 3] = [3, 4, 5];

/// Smallest group size listed in the division table.
pub const MINIMUM_GROUP_SIZE: usize = 3;

/// Group size past the largest one listed in the division table.
pub const MAXIMUM_GROUP_SIZE: usize = 17;

/// All multisets of `parts` summing to `total`.
///
/// Divisions come ordered by number of parts, then lexicographically; each
/// division is non-decreasing.
pub fn divisions(total: usize, parts: &[usize]) -> Vec<Vec<usize>> {
    let mut sorted = parts.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut found = Vec::new();
    let smallest = match sorted.first() {
        Some(&s) if s > 0 => s,
        _ => return found,
    };
    for length in 1..=total / smallest {
        let mut current = Vec::with_capacity(length);
        collect_divisions(total, length, &sorted, 0, &mut current, &mut found);
    }
    found
}

fn collect_divisions(
    remaining: usize,
    length: usize,
    parts: &[usize],
    from: usize,
    current: &mut Vec<usize>,
    found: &mut Vec<Vec<usize>>,
) {
    if current.len() == length {
        if remaining == 0 {
            found.push(current.clone());
        }
        return;
    }
    for (index, &part) in parts.iter().enumerate().skip(from) {
        if part > remaining {
            break;
        }
        current.push(part);
        collect_divisions(remaining - part, length, parts, index, current, found);
        current.pop();
    }
}

/// LaTeX text listing every way a group of `group_size` divides into parties.
pub fn division_text(group_size: usize) -> String {
    divisions(group_size, &PARTY_SIZES)
        .iter()
        .map(|division| {
            if division.len() == 1 {
                division[0].to_string()
            } else {
                let sum = division
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("+");
                format!("${}$", sum)
            }
        })
        .collect::<Vec<_>>()
        .join(" or ")
}

/// The group division table, two group sizes per row.
///
/// The sizes in `[minimum, maximum)` are split in half; row `i` holds the
/// `i`-th size of each half as `[size, divisions, size, divisions]`.
pub fn group_division_table(minimum: usize, maximum: usize) -> Vec<[String; 4]> {
    let sizes: Vec<usize> = (minimum..maximum).collect();
    let half = sizes.len() / 2;
    sizes[..half]
        .iter()
        .zip(&sizes[half..])
        .map(|(&left, &right)| {
            [
                left.to_string(),
                division_text(left),
                right.to_string(),
                division_text(right),
            ]
        })
        .collect()
}

/// Renders the score document.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRenderer {
    /// Title of the piece.
    pub title: String,
    /// Directory of the default output path.
    pub build_dir: PathBuf,
}

impl ScoreRenderer {
    /// Creates a score renderer.
    pub fn new(title: impl Into<String>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            build_dir: build_dir.into(),
        }
    }
}

impl DocumentRenderer for ScoreRenderer {
    type Input = ();

    fn default_path(&self, _: &()) -> PathBuf {
        self.build_dir.join("score")
    }

    fn render(&self, _: &()) -> String {
        let mut tex = String::new();
        tex.push_str(
            "\\documentclass{article}\n\
             \\usepackage{fontspec}\n\
             \\usepackage{booktabs}\n\
             \\begin{document}\n",
        );
        let _ = writeln!(tex, r"\section*{{{}}}", escape_latex(&self.title));
        tex.push_str(
            "\\subsection*{group division}\n\
             \\begin{tabular}{r l r l}\n\
             \\toprule\n\
             \\textbf{players} & \\textbf{parties} & \\textbf{players} & \\textbf{parties} \\\\\n\
             \\midrule\n",
        );
        for row in group_division_table(MINIMUM_GROUP_SIZE, MAXIMUM_GROUP_SIZE) {
            let _ = writeln!(tex, r"{} \\", row.join(" & "));
        }
        tex.push_str("\\bottomrule\n\\end{tabular}\n\\end{document}\n");
        tex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_divisions() {
        assert_eq!(divisions(3, &PARTY_SIZES), vec![vec![3]]);
        assert_eq!(divisions(8, &PARTY_SIZES), vec![vec![3, 5], vec![4, 4]]);
        assert_eq!(
            divisions(10, &PARTY_SIZES),
            vec![vec![5, 5], vec![3, 3, 4]]
        );
        assert!(divisions(2, &PARTY_SIZES).is_empty());
        assert!(divisions(7, &[]).is_empty());
    }

    #[test]
    fn test_division_text() {
        assert_eq!(division_text(4), "4");
        assert_eq!(division_text(9), "$4+5$ or $3+3+3$");
        assert_eq!(division_text(6), "$3+3$");
    }

    #[test]
    fn test_group_division_table_pairs_halves() {
        let table = group_division_table(MINIMUM_GROUP_SIZE, MAXIMUM_GROUP_SIZE);
        assert_eq!(table.len(), 7);
        assert_eq!(table[0][0], "3");
        assert_eq!(table[0][2], "10");
        assert_eq!(table[6][0], "9");
        assert_eq!(table[6][2], "16");
        assert_eq!(table[1][3], "$3+3+5$ or $3+4+4$");
    }

    #[test]
    fn test_render() {
        let renderer = ScoreRenderer::new("pages", "builds");
        assert_eq!(renderer.default_path(&()), PathBuf::from("builds/score"));
        let tex = renderer.render(&());
        assert!(tex.contains(r"\section*{pages}"));
        assert!(tex.contains(r"3 & 3 & 10 & $5+5$ or $3+3+4$ \\"));
    }
}
