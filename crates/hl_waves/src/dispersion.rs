// crates/hl_waves/src/dispersion.rs

//! 深水色散关系与波长换算
//!
//! ζ = log2(波长)，几何级数的波长离散对级联波谱有更好的分辨特性。

use std::f64::consts::TAU;

/// 重力加速度 [m/s²]
pub const GRAVITY: f64 = 9.81;

/// ζ 对应的波长 [m]
#[inline]
pub fn wave_length(zeta: f64) -> f64 {
    2.0_f64.powf(zeta)
}

/// ζ 对应的波数 [rad/m]
#[inline]
pub fn wave_number(zeta: f64) -> f64 {
    TAU / wave_length(zeta)
}

/// 无限深度色散关系 ω(k) = sqrt(k·g)
///
/// <https://en.wikipedia.org/wiki/Dispersion_(water_waves)>
#[inline]
pub fn dispersion_relation(knum: f64) -> f64 {
    (knum * GRAVITY).sqrt()
}

/// 深水群速度 cg(k) = 0.5·sqrt(g/k)
#[inline]
pub fn deep_water_group_speed(knum: f64) -> f64 {
    0.5 * (GRAVITY / knum).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wave_length_is_pow2_of_zeta() {
        assert_relative_eq!(wave_length(0.0), 1.0);
        assert_relative_eq!(wave_length(3.0), 8.0);
        assert_relative_eq!(wave_length(-1.0), 0.5);
    }

    #[test]
    fn test_group_speed_is_half_phase_speed() {
        // 深水中 c = ω/k = sqrt(g/k)，cg = c/2
        let k = 0.7;
        let phase_speed = dispersion_relation(k) / k;
        assert_relative_eq!(deep_water_group_speed(k), 0.5 * phase_speed, epsilon = 1e-12);
    }

    #[test]
    fn test_longer_waves_travel_faster() {
        let cg_short = deep_water_group_speed(wave_number(-3.0));
        let cg_long = deep_water_group_speed(wave_number(3.0));
        assert!(cg_long > cg_short);
    }
}
