//! Full-table Levenshtein alignment with trace-back.
//!
//! `a` plays the reference and `b` the hypothesis: consuming a symbol of `a`
//! alone is a deletion, consuming a symbol of `b` alone is an insertion.

use crate::cost::CostModel;
use crate::error::AlignError;

/// An aligned pair; one side may be the caller's epsilon symbol, never both.
pub type AlignedPair<T> = (T, T);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment<T> {
    /// Weighted cost under the model used, not an operation count.
    pub total_cost: u64,
    /// Pairs in front-to-back order of both inputs.
    pub pairs: Vec<AlignedPair<T>>,
}

/// Predecessor chosen during trace-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Diagonal,
    Deletion,
    Insertion,
}

/// Row-major `(rows x cols)` table of prefix costs.
struct CostTable {
    cols: usize,
    cells: Vec<u64>,
}

impl CostTable {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            cells: vec![0; rows.saturating_mul(cols)],
        }
    }

    #[inline]
    fn get(&self, m: usize, n: usize) -> u64 {
        self.cells[m * self.cols + n]
    }

    #[inline]
    fn set(&mut self, m: usize, n: usize, value: u64) {
        self.cells[m * self.cols + n] = value;
    }
}

/// Aligns `a` against `b` under the uniform model, or the sclite model when
/// `sclite_mode` is set.
pub fn align<T: PartialEq + Clone>(
    a: &[T],
    b: &[T],
    eps: &T,
    sclite_mode: bool,
) -> Result<Alignment<T>, AlignError> {
    align_with(a, b, eps, CostModel::from_sclite_mode(sclite_mode))
}

/// Aligns `a` against `b` under an explicit cost model.
///
/// Neither input may contain `eps`.
pub fn align_with<T: PartialEq + Clone>(
    a: &[T],
    b: &[T],
    eps: &T,
    costs: CostModel,
) -> Result<Alignment<T>, AlignError> {
    check_no_epsilon(a, eps, "a")?;
    check_no_epsilon(b, eps, "b")?;

    let rows = a.len() + 1;
    let cols = b.len() + 1;
    let mut table = CostTable::new(rows, cols);
    for n in 0..cols {
        table.set(0, n, n as u64 * u64::from(costs.insertion));
    }
    for m in 1..rows {
        table.set(m, 0, m as u64 * u64::from(costs.deletion));
        for n in 1..cols {
            let (sub_or_ok, del, ins) = candidates(&table, a, b, m, n, costs);
            table.set(m, n, sub_or_ok.min(del).min(ins));
        }
    }

    let (mut m, mut n) = (a.len(), b.len());
    let mut pairs = Vec::with_capacity(a.len() + b.len());
    while m != 0 || n != 0 {
        let step = if m == 0 {
            Step::Insertion
        } else if n == 0 {
            Step::Deletion
        } else {
            let (sub_or_ok, del, ins) = candidates(&table, a, b, m, n, costs);
            if sub_or_ok < del.min(ins) {
                Step::Diagonal
            } else if del < ins {
                Step::Deletion
            } else {
                Step::Insertion
            }
        };

        match step {
            Step::Diagonal => {
                m -= 1;
                n -= 1;
                pairs.push((a[m].clone(), b[n].clone()));
            }
            Step::Deletion => {
                m -= 1;
                pairs.push((a[m].clone(), eps.clone()));
            }
            Step::Insertion => {
                n -= 1;
                pairs.push((eps.clone(), b[n].clone()));
            }
        }
    }
    // Collected from the end of both sequences.
    pairs.reverse();

    Ok(Alignment {
        total_cost: table.get(a.len(), b.len()),
        pairs,
    })
}

fn check_no_epsilon<T: PartialEq>(
    seq: &[T],
    eps: &T,
    sequence: &'static str,
) -> Result<(), AlignError> {
    match seq.iter().position(|s| s == eps) {
        Some(position) => Err(AlignError::EpsilonInInput { sequence, position }),
        None => Ok(()),
    }
}

/// `(sub_or_ok, del, ins)` for cell `(m, n)`, both indices >= 1.
#[inline]
fn candidates<T: PartialEq>(
    table: &CostTable,
    a: &[T],
    b: &[T],
    m: usize,
    n: usize,
    costs: CostModel,
) -> (u64, u64, u64) {
    let sub_or_ok =
        table.get(m - 1, n - 1) + u64::from(costs.substitution_or_match(&a[m - 1], &b[n - 1]));
    let del = table.get(m - 1, n) + u64::from(costs.deletion);
    let ins = table.get(m, n - 1) + u64::from(costs.insertion);
    (sub_or_ok, del, ins)
}
