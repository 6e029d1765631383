//! Closed-form M/M/1/K results used as the reference curve of a sweep.

const UNIT_LOAD_EPS: f64 = 1e-12;

/// Stationary probability of `n` customers in an M/M/1/K system at load `rho`.
pub fn state_probability(rho: f64, k: usize, n: usize) -> f64 {
    if n > k {
        return 0.;
    }
    if (rho - 1.).abs() < UNIT_LOAD_EPS {
        return 1. / (k as f64 + 1.);
    }
    if rho < 1. {
        rho.powi(n as i32) * (1. - rho) / (1. - rho.powi(k as i32 + 1))
    }
    else {
        // Overloaded: rewrite in r = 1/ρ so no power grows past 1.
        let r = 1. / rho;
        r.powi((k - n) as i32) * (1. - r) / (1. - r.powi(k as i32 + 1))
    }
}

/// Probability that an arrival finds the system full: ρ^K(1−ρ)/(1−ρ^(K+1)),
/// or 1/(K+1) at ρ = 1.
pub fn rejection_probability(rho: f64, k: usize) -> f64 {
    state_probability(rho, k, k)
}

/// P_K / Σ_{j<K} P_j: lost arrivals per admitted arrival.
pub fn admitted_to_rejected_ratio(rho: f64, k: usize) -> f64 {
    let admitted: f64 = (0..k).map(|j| state_probability(rho, k, j)).sum();
    rejection_probability(rho, k) / admitted
}

/// Mean number of customers in the system, L.
pub fn mean_customers(rho: f64, k: usize) -> f64 {
    (0..=k).map(|n| n as f64 * state_probability(rho, k, n)).sum()
}

/// Mean time spent waiting for the server by admitted customers, W_q, from
/// Little's law on the effective arrival rate.
pub fn mean_wait_time(arrival_rate: f64, service_rate: f64, k: usize) -> f64 {
    let rho = arrival_rate / service_rate;
    let p0 = state_probability(rho, k, 0);
    let effective_rate = arrival_rate * (1. - rejection_probability(rho, k));
    let in_queue = mean_customers(rho, k) - (1. - p0);
    in_queue / effective_rate
}
