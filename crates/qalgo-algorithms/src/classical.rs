//! Classical reference solutions, for comparison with the quantum drivers.
//!
//! Each solver counts the oracle queries it spends so the speed-up the
//! quantum version achieves can be read off directly.

use std::collections::HashMap;

use serde::Serialize;

use crate::bits::BitString;
use crate::drivers::grover::MARKED;
use crate::error::AlgoResult;
use crate::oracles::check_clauses;

/// Answer and cost of a classical solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassicalSolution {
    /// Algorithm slug.
    pub algorithm: String,
    /// Oracle evaluations spent.
    pub queries: usize,
    /// Recovered values, keyed like measurement outcomes.
    pub result: Vec<String>,
    /// Human-readable account of the search.
    pub explanation: String,
}

/// Recover `s` from `f(x) = s·x mod 2` by querying each unit vector.
pub fn bernstein_vazirani(secret: &BitString) -> ClassicalSolution {
    let n = secret.len();
    let f = |x: usize| (secret.value() & x).count_ones() % 2;
    let recovered = (0..n).fold(0usize, |acc, i| acc | ((f(1 << i) as usize) << i));
    ClassicalSolution {
        algorithm: "bernstein_vazirani".into(),
        queries: n,
        result: vec![BitString::from_value(recovered, n).to_string()],
        explanation: format!("queried f on the {n} unit vectors, one bit of s per query"),
    }
}

/// Scan the 2-bit search space in order until the marked item turns up.
pub fn grover() -> ClassicalSolution {
    let mut queries = 0;
    let mut found = None;
    for value in 0..4 {
        queries += 1;
        let candidate = BitString::from_value(value, 2);
        if candidate.as_str() == MARKED {
            found = Some(candidate);
            break;
        }
    }
    ClassicalSolution {
        algorithm: "grover".into(),
        queries,
        result: found.into_iter().map(|b| b.to_string()).collect(),
        explanation: format!("linear scan of 4 items took {queries} oracle queries"),
    }
}

/// Every assignment of `num_vars` binary variables satisfying all
/// inequality clauses, sorted, keyed most-significant variable first.
///
/// Clauses are assumed to name variables below `num_vars`.
pub fn sudoku_assignments(clauses: &[[usize; 2]], num_vars: usize) -> Vec<String> {
    let bit = |value: usize, var: usize| (value >> var) & 1;
    let mut solutions: Vec<String> = (0..1usize << num_vars)
        .filter(|&value| clauses.iter().all(|&[a, b]| bit(value, a) != bit(value, b)))
        .map(|value| BitString::from_value(value, num_vars).to_string())
        .collect();
    solutions.sort();
    solutions
}

/// Brute-force the Sudoku clauses over all assignments.
pub fn sudoku(clauses: &[[usize; 2]], num_vars: usize) -> AlgoResult<ClassicalSolution> {
    check_clauses(clauses, num_vars)?;
    let result = sudoku_assignments(clauses, num_vars);
    let queries = 1 << num_vars;
    Ok(ClassicalSolution {
        algorithm: "grover_sudoku".into(),
        queries,
        explanation: format!(
            "checked all {queries} assignments, {} satisfy every clause",
            result.len()
        ),
        result,
    })
}

/// The two-to-one function the Simon oracle computes:
/// `f(x) = x ⊕ (x_p · b)` with `p` the lowest set bit of `b`.
pub fn simon_function(secret: &BitString, x: usize) -> usize {
    match secret.set_bits().first() {
        Some(&pivot) if (x >> pivot) & 1 == 1 => x ^ secret.value(),
        _ => x,
    }
}

/// Evaluate the Simon function until two inputs collide.
pub fn simon(secret: &BitString) -> ClassicalSolution {
    let n = secret.len();
    let mut seen: HashMap<usize, usize> = HashMap::new();
    let mut queries = 0;
    let mut period = None;
    for x in 0..1usize << n {
        queries += 1;
        let fx = simon_function(secret, x);
        if let Some(&y) = seen.get(&fx) {
            period = Some(x ^ y);
            break;
        }
        seen.insert(fx, x);
    }

    let explanation = match period {
        Some(_) => format!("collision found after {queries} queries, b = x ⊕ y"),
        None => format!("all {queries} outputs distinct, f is one-to-one and b = 0"),
    };
    ClassicalSolution {
        algorithm: "simon".into(),
        queries,
        result: vec![BitString::from_value(period.unwrap_or(0), n).to_string()],
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_bernstein_vazirani_recovers_secret() {
        let solution = bernstein_vazirani(&bits("111000"));
        assert_eq!(solution.result, vec!["111000"]);
        assert_eq!(solution.queries, 6);
    }

    #[test]
    fn test_grover_scan() {
        let solution = grover();
        assert_eq!(solution.result, vec!["11"]);
        assert_eq!(solution.queries, 4);
    }

    #[test]
    fn test_sudoku_four_cycle() {
        let clauses = [[0, 1], [0, 2], [1, 3], [2, 3]];
        assert_eq!(sudoku_assignments(&clauses, 4), vec!["0110", "1001"]);
        let solution = sudoku(&clauses, 4).unwrap();
        assert_eq!(solution.queries, 16);
        assert!(sudoku(&[[0, 4]], 4).is_err());
    }

    #[test]
    fn test_simon_function_is_two_to_one() {
        let secret = bits("110");
        for x in 0..8 {
            assert_eq!(simon_function(&secret, x), simon_function(&secret, x ^ 0b110));
        }
        assert_eq!(simon(&secret).result, vec!["110"]);
    }

    #[test]
    fn test_simon_zero_secret() {
        let solution = simon(&bits("000"));
        assert_eq!(solution.result, vec!["000"]);
        assert_eq!(solution.queries, 8);
    }
}
