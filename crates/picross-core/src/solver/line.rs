//! Enumerates every line consistent with a clue.

/// Strip the `[0]` marker (and any stray zeros) from a clue
pub(crate) fn runs_of(clue: &[usize]) -> Vec<usize> {
    clue.iter().copied().filter(|&r| r > 0).collect()
}

/// Minimum line length that fits `runs` with one gap between runs
fn min_length(runs: &[usize]) -> usize {
    runs.iter().sum::<usize>() + runs.len().saturating_sub(1)
}

/// All boolean lines of length `len` whose runs equal `clue` in order.
///
/// `[0]` (or an empty clue) yields the single all-empty line; a clue that does
/// not fit yields no lines.
pub fn line_candidates(len: usize, clue: &[usize]) -> Vec<Vec<bool>> {
    let runs = runs_of(clue);
    if min_length(&runs) > len {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(placement_count(len, clue));
    let mut line = vec![false; len];
    place(len, &runs, 0, 0, &mut line, &mut out);
    out
}

fn place(
    len: usize,
    runs: &[usize],
    index: usize,
    cursor: usize,
    line: &mut Vec<bool>,
    out: &mut Vec<Vec<bool>>,
) {
    if index == runs.len() {
        out.push(line.clone());
        return;
    }

    let run = runs[index];
    let rest = &runs[index + 1..];
    // Cells the later runs need, including the gap in front of each
    let tail = rest.iter().sum::<usize>() + rest.len();
    let latest = len - tail - run;

    for start in cursor..=latest {
        line[start..start + run].fill(true);
        let next = if rest.is_empty() {
            start + run
        } else {
            start + run + 1
        };
        place(len, runs, index + 1, next, line, out);
        line[start..start + run].fill(false);
    }
}

/// Closed-form number of placements: `C(free + k, k)` where `k` is the run
/// count and `free` the slack left after the runs and mandatory gaps.
pub fn placement_count(len: usize, clue: &[usize]) -> usize {
    let runs = runs_of(clue);
    let needed = min_length(&runs);
    if needed > len {
        return 0;
    }
    let k = runs.len() as u128;
    let n = (len - needed) as u128 + k;
    // C(n, k), multiplicative form keeps every step integral
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    usize::try_from(result).unwrap_or(usize::MAX)
}
