const SCORE_CONTINUE_MATCH: f64 = 1.0;
const SCORE_SPACE_WORD_JUMP: f64 = 0.9;
const SCORE_DELIMITER_WORD_JUMP: f64 = 0.8;
const SCORE_CHARACTER_JUMP: f64 = 0.17;
const SCORE_TRAILING_TARGET: f64 = 0.99;

const PENALTY_SKIPPED: f64 = 0.999;
const PENALTY_CASE_MISMATCH: f64 = 0.9999;

const DELIMITERS: &[char] = &['\\', '/', '_', '+', '.', '#', '"', '@', '[', '(', '{', '&'];

/// Scores how well `query` matches `target` (or one of its `aliases`) as a
/// case-insensitive subsequence. Returns a value in `[0, 1]`; `0` means no match.
///
/// Contiguous runs, word-boundary jumps and exact case score higher. Skipped
/// characters decay the score geometrically. Scores are only comparable
/// between candidates scored against the same query.
pub fn score(target: &str, query: &str, aliases: &[String]) -> f64 {
    Alignment::new(target, query, aliases).best()
}

/// State for a single scoring call.
///
/// `best` fills the `(position, query index)` table bottom-up, one query index
/// at a time, keeping only the row being built and the one below it. Each row
/// only covers the positions from which the rest of the query can still be
/// matched; everything outside that window scores 0.
struct Alignment {
    haystack: Vec<char>,
    true_case: Vec<char>,
    needle: Vec<char>,
    query: Vec<char>,
    target_len: usize,
}

impl Alignment {
    fn new(target: &str, query: &str, aliases: &[String]) -> Self {
        let mut augmented = String::with_capacity(target.len() + 1);
        augmented.push_str(target);
        augmented.push(' ');
        augmented.push_str(&aliases.join(" "));

        let true_case: Vec<char> = augmented.chars().collect();
        let haystack: Vec<char> = true_case.iter().copied().map(fold_case).collect();
        let query: Vec<char> = query.chars().collect();
        let needle: Vec<char> = query.iter().copied().map(fold_case).collect();

        Self {
            haystack,
            true_case,
            needle,
            query,
            target_len: target.chars().count(),
        }
    }

    fn best(&self) -> f64 {
        let Some(lower) = self.lower_bounds() else {
            return 0.0;
        };
        let upper = self.upper_bounds();
        let n = self.needle.len();

        let mut below = Row::finished(lower[n], self.haystack.len(), self.target_len);
        for qi in (0..n).rev() {
            below = self.row(qi, lower[qi], upper[qi], &below);
        }
        below.get(0)
    }

    /// Scores for query index `qi` at every position in `start..=end`.
    fn row(&self, qi: usize, start: usize, end: usize, below: &Row) -> Row {
        let wanted = self.needle[qi];
        let mut values = vec![0.0; end - start + 1];

        // Best score reachable by skipping ahead from `pos` to a later
        // occurrence, already discounted for the skipped distance.
        let mut jump = 0.0_f64;
        for pos in (start..=end).rev() {
            jump = PENALTY_SKIPPED * jump.max(self.jump_to(qi, pos + 1, below));

            let contiguous = if self.haystack[pos] == wanted {
                below.get(pos + 1) * SCORE_CONTINUE_MATCH * self.case_factor(qi, pos)
            } else {
                0.0
            };

            values[pos - start] = contiguous.max(jump);
        }

        Row { start, values }
    }

    /// Score of matching `needle[qi]` at `idx` after a jump, before the skip penalty.
    fn jump_to(&self, qi: usize, idx: usize, below: &Row) -> f64 {
        match self.haystack.get(idx) {
            Some(&c) if c == self.needle[qi] => {
                below.get(idx + 1) * self.boundary_bonus(idx) * self.case_factor(qi, idx)
            }
            _ => 0.0,
        }
    }

    // Only called for idx >= 1: a jump always lands after the start position.
    fn boundary_bonus(&self, idx: usize) -> f64 {
        let previous = self.true_case[idx - 1];
        if previous.is_whitespace() || previous == '-' {
            SCORE_SPACE_WORD_JUMP
        } else if DELIMITERS.contains(&previous) {
            SCORE_DELIMITER_WORD_JUMP
        } else {
            SCORE_CHARACTER_JUMP
        }
    }

    fn case_factor(&self, qi: usize, idx: usize) -> f64 {
        if self.true_case[idx] == self.query[qi] {
            1.0
        } else {
            PENALTY_CASE_MISMATCH
        }
    }

    /// `lower[qi]` is the earliest position the search can be at once
    /// `needle[..qi]` is matched. `None` when the needle is not a subsequence.
    fn lower_bounds(&self) -> Option<Vec<usize>> {
        let mut lower = Vec::with_capacity(self.needle.len() + 1);
        let mut pos = 0;
        lower.push(pos);
        for &wanted in &self.needle {
            let offset = self.haystack.get(pos..)?.iter().position(|&c| c == wanted)?;
            pos += offset + 1;
            lower.push(pos);
        }
        Some(lower)
    }

    /// `upper[qi]` is the last position from which `needle[qi..]` can still be
    /// matched. Only meaningful once `lower_bounds` succeeded.
    fn upper_bounds(&self) -> Vec<usize> {
        let n = self.needle.len();
        let mut upper = vec![self.haystack.len(); n + 1];
        for qi in (0..n).rev() {
            let limit = upper[qi + 1];
            upper[qi] = self.haystack[..limit]
                .iter()
                .rposition(|&c| c == self.needle[qi])
                .unwrap_or(0);
        }
        upper
    }
}

/// One row of the table: scores for positions `start..start + values.len()`.
struct Row {
    start: usize,
    values: Vec<f64>,
}

impl Row {
    /// The row past the last query character.
    fn finished(start: usize, end: usize, target_len: usize) -> Self {
        let values = (start..=end)
            .map(|pos| {
                if pos == target_len {
                    SCORE_CONTINUE_MATCH
                } else {
                    SCORE_TRAILING_TARGET
                }
            })
            .collect();
        Self { start, values }
    }

    fn get(&self, pos: usize) -> f64 {
        pos.checked_sub(self.start)
            .and_then(|offset| self.values.get(offset))
            .copied()
            .unwrap_or(0.0)
    }
}

// Lowercasing must not change the character count, otherwise indices into
// the folded haystack would drift from the true-case one.
fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
