//! Win detection: finds the sequences completed by a single chip placement.
//!
//! Only the four lines through the placed chip are inspected. Each line is
//! evaluated on its own by [`evaluate_segment`], so a placement may credit
//! anywhere from zero to four sequences.

use serde::{Deserialize, Serialize};

use crate::grid::{segment, Coord, Direction, BOARD_SIDE, RUN_LENGTH};
use crate::place::{BoardPlace, Seat};

/// A sequence credited by one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditedSequence {
    pub direction: Direction,
    /// Board indices of the run, in line order (wild cells included)
    pub cells: Vec<usize>,
}

/// Scans the four lines through `origin` for runs controlled by `seat`,
/// locks the cells of every new run, and returns the credited sequences.
pub fn scan_from(places: &mut [BoardPlace], origin: Coord, seat: Seat) -> Vec<CreditedSequence> {
    let mut credited = Vec::new();
    for direction in Direction::ALL {
        let line = segment(origin, direction);
        let Some(origin_pos) = line.iter().position(|c| *c == origin) else {
            continue;
        };
        if let Some((first, last)) = evaluate_segment(places, &line, origin_pos, seat) {
            let cells: Vec<usize> = line[first..=last].iter().map(|c| c.index()).collect();
            for &i in &cells {
                if !places[i].is_wild() {
                    places[i].lock_into_sequence();
                }
            }
            tracing::debug!(?direction, ?cells, ?seat, "run locked");
            credited.push(CreditedSequence { direction, cells });
        }
    }
    credited
}

/// Evaluates one bounded line for a new run through `line[origin_pos]`.
///
/// Returns the inclusive `(first, last)` positions within `line` of the run
/// to credit, or `None`.
///
/// A line already holding a credited run (see [`credited_cells`]) yields a
/// new sequence either when the seat controls the entire full-length line,
/// or through a fresh run that reuses no cell of an earlier one. Lines
/// without a prior run count locked cells like any other, so runs may
/// cross sequences made along other directions.
pub fn evaluate_segment(
    places: &[BoardPlace],
    line: &[Coord],
    origin_pos: usize,
    seat: Seat,
) -> Option<(usize, usize)> {
    let place = |pos: usize| &places[line[pos].index()];
    let used = credited_cells(places, line);
    let prior_run = used.iter().any(|&u| u);

    if prior_run
        && line.len() == BOARD_SIDE
        && (0..line.len()).all(|p| place(p).is_controlled_by(seat))
        && (0..line.len()).any(|p| !used[p])
    {
        return Some((0, line.len() - 1));
    }

    let counts = |pos: usize| {
        let p = place(pos);
        p.is_controlled_by(seat) && !(prior_run && (used[pos] || p.is_locked()))
    };
    if !counts(origin_pos) {
        return None;
    }

    let mut first = origin_pos;
    while first > 0 && counts(first - 1) {
        first -= 1;
    }
    let mut last = origin_pos;
    while last + 1 < line.len() && counts(last + 1) {
        last += 1;
    }

    (last - first + 1 >= RUN_LENGTH).then_some((first, last))
}

/// Marks the cells of `line` that belong to an already credited run.
///
/// Jokers are never locked, so a credited run shows up as a stretch of at
/// least [`RUN_LENGTH`] cells that are each locked or wild, with at least
/// one locked cell. Every cell of such a stretch, jokers included, is
/// marked.
pub fn credited_cells(places: &[BoardPlace], line: &[Coord]) -> Vec<bool> {
    let mut used = vec![false; line.len()];
    let mut start = 0;
    while start < line.len() {
        let spent = |pos: usize| {
            let p = &places[line[pos].index()];
            p.is_locked() || p.is_wild()
        };
        if !spent(start) {
            start += 1;
            continue;
        }
        let mut end = start;
        while end + 1 < line.len() && spent(end + 1) {
            end += 1;
        }
        let any_locked = (start..=end).any(|p| places[line[p].index()].is_locked());
        if end - start + 1 >= RUN_LENGTH && any_locked {
            used[start..=end].iter_mut().for_each(|u| *u = true);
        }
        start = end + 1;
    }
    used
}
