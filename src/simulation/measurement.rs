// src/simulation/measurement.rs
use crate::core::constants::qdutch_constants::{AMPLITUDE_TOLERANCE, NORM_TOLERANCE};
use crate::core::{QDutchError, Register};
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;
use tracing::{debug, warn};

impl Register {
    /// Probability mass on basis labels whose bit `qubit` is set.
    pub fn probability_of_one(&self, qubit: usize) -> Result<f64, QDutchError> {
        self.check_qubit(qubit)?;
        let mask = 1usize << qubit;
        Ok(self
            .amplitudes()
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum())
    }

    /// Measures one qubit and collapses the register onto the outcome.
    ///
    /// The outcome is drawn from the qubit's marginal distribution. Amplitudes
    /// inconsistent with it are zeroed and the survivors are divided by the
    /// square root of the retained mass, which also removes any accumulated
    /// floating-point drift.
    ///
    /// # Returns
    /// The observed bit, `0` or `1`.
    ///
    /// # Errors
    /// * `InvalidArgument` when `qubit >= N`.
    /// * `DegenerateState` when the retained mass is numerically zero. The
    ///   register is left untouched in both cases.
    pub fn measure_qubit<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) -> Result<u8, QDutchError> {
        let p_one_raw = self.probability_of_one(qubit)?;
        let total = self.checked_total_mass()?;
        let p_one = if p_one_raw < AMPLITUDE_TOLERANCE {
            0.0
        } else if total - p_one_raw < AMPLITUDE_TOLERANCE {
            1.0
        } else {
            p_one_raw / total
        };

        let outcome = u8::from(rng.random::<f64>() < p_one);
        let retained = if outcome == 1 { p_one_raw } else { total - p_one_raw };
        if retained < AMPLITUDE_TOLERANCE {
            return Err(QDutchError::degenerate(format!(
                "measuring qubit {} gave outcome {} with retained mass {:e}",
                qubit, outcome, retained
            )));
        }

        let mask = 1usize << qubit;
        let scale = retained.sqrt().recip();
        for (i, amp) in self.amplitudes_mut().iter_mut().enumerate() {
            if u8::from(i & mask != 0) == outcome {
                *amp *= scale;
            } else {
                *amp = Complex::zero();
            }
        }
        debug!(qubit, outcome, p_one, "measured qubit");
        Ok(outcome)
    }

    /// Measures every qubit at once.
    ///
    /// A basis index is drawn with probability equal to its squared amplitude,
    /// then the register is re-initialized to that basis state so it is a
    /// definite classical value afterwards.
    ///
    /// # Errors
    /// `DegenerateState` when the register holds no probability mass at all.
    pub fn measure_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, QDutchError> {
        let total = self.checked_total_mass()?;
        let sample = rng.random::<f64>() * total;

        let mut cumulative = 0.0;
        let mut chosen = None;
        for (index, amp) in self.amplitudes().iter().enumerate() {
            let p = amp.norm_sqr();
            if p < AMPLITUDE_TOLERANCE {
                continue;
            }
            // The last non-negligible index wins if rounding pushes sample past the end
            chosen = Some(index);
            cumulative += p;
            if sample < cumulative {
                break;
            }
        }
        let index = chosen.ok_or_else(|| QDutchError::degenerate("no basis state carries probability mass"))?;

        self.initialize_basis(index)?;
        debug!(index, "measured register");
        Ok(index)
    }

    /// Total probability mass, rejecting vectors that have none.
    fn checked_total_mass(&self) -> Result<f64, QDutchError> {
        let total = self.norm_sqr();
        if total < AMPLITUDE_TOLERANCE {
            return Err(QDutchError::degenerate(format!(
                "register has total probability mass {:e}",
                total
            )));
        }
        if (total - 1.0).abs() > NORM_TOLERANCE {
            warn!(norm_sqr = total, "register norm drifted; renormalizing on measurement");
        }
        Ok(total)
    }
}
