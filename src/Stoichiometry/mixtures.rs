/// Molecular weight of mixtures and conversion between mass and mole fractions
use super::stoich_errors::StoichError;

// same tolerances as numpy.isclose
const RTOL: f64 = 1e-5;
const ATOL: f64 = 1e-8;

fn check_fractions(fractions: &[f64], mws: &[f64], what: &str) -> Result<(), StoichError> {
    if fractions.len() != mws.len() {
        return Err(StoichError::InvalidFractions(format!(
            "{} {} fractions given for {} molecular weights",
            fractions.len(),
            what,
            mws.len()
        )));
    }
    let sum: f64 = fractions.iter().sum();
    if (sum - 1.0).abs() > ATOL + RTOL {
        return Err(StoichError::InvalidFractions(format!(
            "sum of {} fractions must be 1.0, got {}",
            what, sum
        )));
    }
    Ok(())
}

/// Molecular weight of a gas mixture (g/mol) as the mean of component molecular weights weighted by mole fractions
pub fn mw_mix(mws: &[f64], xs: &[f64]) -> Result<f64, StoichError> {
    check_fractions(xs, mws, "mole")?;
    let weighted: f64 = mws.iter().zip(xs).map(|(mw, x)| mw * x).sum();
    let sum_x: f64 = xs.iter().sum();
    Ok(weighted / sum_x)
}

/// Converts mass fractions to mole fractions: x_i = (y_i/MW_i) / Σ(y_j/MW_j)
pub fn massfrac_to_molefrac(y: &[f64], mw: &[f64]) -> Result<Vec<f64>, StoichError> {
    check_fractions(y, mw, "mass")?;
    let moles: Vec<f64> = y.iter().zip(mw).map(|(y, mw)| y * 100.0 / mw).collect();
    let total: f64 = moles.iter().sum();
    Ok(moles.iter().map(|n| n / total).collect())
}

/// Converts mole fractions to mass fractions: y_i = x_i MW_i / Σ x_j MW_j
pub fn molefrac_to_massfrac(x: &[f64], mw: &[f64]) -> Result<Vec<f64>, StoichError> {
    check_fractions(x, mw, "mole")?;
    let masses: Vec<f64> = x.iter().zip(mw).map(|(x, mw)| x * 100.0 * mw).collect();
    let total: f64 = masses.iter().sum();
    Ok(masses.iter().map(|m| m / total).collect())
}
