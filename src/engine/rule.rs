use std::sync::OnceLock;

/// Neighbor counts range over `0..=8` for the Moore neighborhood
const NEIGHBOR_COUNTS: usize = 9;
type LifeRuleTable = [[bool; NEIGHBOR_COUNTS]; 2];

/// Returns a Singleton lookup table for the Game of Life ruleset
///
/// Equivalent to calling [`generate_rule_table`] once and storing the result
fn get_rule_table() -> &'static LifeRuleTable {
    static CELL: OnceLock<LifeRuleTable> = OnceLock::new();
    CELL.get_or_init(generate_rule_table)
}

/// Creates a lookup table for the Game of Life ruleset (B3/S23)
///
/// The table is indexed first by the current state of the cell (`0` dead,
/// `1` alive) and then by its number of live neighbors.
fn generate_rule_table() -> LifeRuleTable {
    let mut table = [[false; NEIGHBOR_COUNTS]; 2];
    for (state, row) in table.iter_mut().enumerate() {
        let alive = state == 1;
        for (neighbors, next) in row.iter_mut().enumerate() {
            *next = matches!((alive, neighbors), (true, 2) | (_, 3));
        }
    }
    table
}

/// Whether a cell is alive in the next generation
///
/// Counts above 8 cannot occur and always yield death.
#[inline]
pub(crate) fn next_state(alive: bool, neighbors: u8) -> bool {
    get_rule_table()[usize::from(alive)]
        .get(usize::from(neighbors))
        .copied()
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_match_conway_life() {
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(next_state(false, 3));

        assert!(!next_state(true, 0));
        assert!(!next_state(true, 1));
        assert!(!next_state(true, 4));
        assert!(!next_state(true, 8));
        assert!(!next_state(false, 2));
        assert!(!next_state(false, 4));
        assert!(!next_state(false, 9));
    }

    #[test]
    fn one_birth_count_two_survival_counts() {
        let table = generate_rule_table();

        assert_eq!(table[0].iter().filter(|&&b| b).count(), 1);
        assert_eq!(table[1].iter().filter(|&&b| b).count(), 2);
    }
}
