//! # Lattice Noise
//!
//! Deterministic hash-based value noise used to shape the terrain.
//!
//! Every function in this module is a pure function of its coordinates and seed:
//! there is no hidden state, so two worlds built from the same seed sample exactly
//! the same values. The lattice hash uses wrapping 32-bit arithmetic, which keeps the
//! results identical on every platform.
//!
//! ## Layers
//!
//! * [`noise2d`] / [`noise3d`] - raw lattice values in `(-1, 1]`
//! * [`noise2d_gradient`] / [`noise3d_gradient`] - bi/trilinear interpolation between lattice points
//! * [`noise2d_perlin`] / [`noise3d_perlin`] (and `_abs` variants) - multi-octave sums
//!
//! [`FractalNoise2`] and [`FractalNoise3`] wrap the octave sums behind the `noise`
//! crate's [`NoiseFn`] trait so they can be sampled like any other noise source.

use noise::NoiseFn;

const NOISE_MAGIC_X: i32 = 1619;
const NOISE_MAGIC_Y: i32 = 31337;
const NOISE_MAGIC_Z: i32 = 52591;
const NOISE_MAGIC_SEED: i32 = 1013;

/// Scrambles a lattice hash into a value in `(-1, 1]`.
fn finish_hash(hash: i32) -> f32 {
    let mut n = hash & 0x7fff_ffff;
    n ^= n >> 13;
    n = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(60493).wrapping_add(19_990_303))
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff;
    1.0 - n as f32 / 1_073_741_824.0
}

/// Lattice value at an integer 2D coordinate.
pub fn noise2d(x: i32, y: i32, seed: i32) -> f32 {
    finish_hash(
        NOISE_MAGIC_X
            .wrapping_mul(x)
            .wrapping_add(NOISE_MAGIC_Y.wrapping_mul(y))
            .wrapping_add(NOISE_MAGIC_SEED.wrapping_mul(seed)),
    )
}

/// Lattice value at an integer 3D coordinate.
pub fn noise3d(x: i32, y: i32, z: i32, seed: i32) -> f32 {
    finish_hash(
        NOISE_MAGIC_X
            .wrapping_mul(x)
            .wrapping_add(NOISE_MAGIC_Y.wrapping_mul(y))
            .wrapping_add(NOISE_MAGIC_Z.wrapping_mul(z))
            .wrapping_add(NOISE_MAGIC_SEED.wrapping_mul(seed)),
    )
}

/// Lower lattice coordinate of a sample.
///
/// Positive values truncate, everything else truncates and steps down by one. Zero
/// therefore maps to `-1` with a fractional part of `1.0`, which interpolates to the
/// same value as the upper lattice point.
fn lattice_floor(v: f32) -> i32 {
    if v > 0.0 {
        v as i32
    } else {
        v as i32 - 1
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Bilinearly interpolated lattice noise.
pub fn noise2d_gradient(x: f32, y: f32, seed: i32) -> f32 {
    let x0 = lattice_floor(x);
    let y0 = lattice_floor(y);
    let xl = x - x0 as f32;
    let yl = y - y0 as f32;

    let v00 = noise2d(x0, y0, seed);
    let v10 = noise2d(x0 + 1, y0, seed);
    let v01 = noise2d(x0, y0 + 1, seed);
    let v11 = noise2d(x0 + 1, y0 + 1, seed);

    let u = lerp(v00, v10, xl);
    let v = lerp(v01, v11, xl);
    lerp(u, v, yl)
}

/// Trilinearly interpolated lattice noise.
pub fn noise3d_gradient(x: f32, y: f32, z: f32, seed: i32) -> f32 {
    let x0 = lattice_floor(x);
    let y0 = lattice_floor(y);
    let z0 = lattice_floor(z);
    let xl = x - x0 as f32;
    let yl = y - y0 as f32;
    let zl = z - z0 as f32;

    let v000 = noise3d(x0, y0, z0, seed);
    let v100 = noise3d(x0 + 1, y0, z0, seed);
    let v010 = noise3d(x0, y0 + 1, z0, seed);
    let v110 = noise3d(x0 + 1, y0 + 1, z0, seed);
    let v001 = noise3d(x0, y0, z0 + 1, seed);
    let v101 = noise3d(x0 + 1, y0, z0 + 1, seed);
    let v011 = noise3d(x0, y0 + 1, z0 + 1, seed);
    let v111 = noise3d(x0 + 1, y0 + 1, z0 + 1, seed);

    v000 * (1.0 - xl) * (1.0 - yl) * (1.0 - zl)
        + v100 * xl * (1.0 - yl) * (1.0 - zl)
        + v010 * (1.0 - xl) * yl * (1.0 - zl)
        + v110 * xl * yl * (1.0 - zl)
        + v001 * (1.0 - xl) * (1.0 - yl) * zl
        + v101 * xl * (1.0 - yl) * zl
        + v011 * (1.0 - xl) * yl * zl
        + v111 * xl * yl * zl
}

/// Sums `octaves` layers of `sample`, doubling the frequency and scaling the
/// amplitude by `persistence` each time. Octave `i` is sampled with `seed + i`.
fn octave_sum(octaves: u32, persistence: f32, sample: impl Fn(f32, i32) -> f32, seed: i32) -> f32 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;

    for octave in 0..octaves {
        total += amplitude * sample(frequency, seed.wrapping_add(octave as i32));
        frequency *= 2.0;
        amplitude *= persistence;
    }

    total
}

/// Multi-octave 2D noise.
pub fn noise2d_perlin(x: f32, y: f32, seed: i32, octaves: u32, persistence: f32) -> f32 {
    octave_sum(octaves, persistence, |f, s| noise2d_gradient(x * f, y * f, s), seed)
}

/// Multi-octave 2D noise summing the absolute value of every octave.
pub fn noise2d_perlin_abs(x: f32, y: f32, seed: i32, octaves: u32, persistence: f32) -> f32 {
    octave_sum(
        octaves,
        persistence,
        |f, s| noise2d_gradient(x * f, y * f, s).abs(),
        seed,
    )
}

/// Multi-octave 3D noise.
pub fn noise3d_perlin(x: f32, y: f32, z: f32, seed: i32, octaves: u32, persistence: f32) -> f32 {
    octave_sum(
        octaves,
        persistence,
        |f, s| noise3d_gradient(x * f, y * f, z * f, s),
        seed,
    )
}

/// Multi-octave 3D noise summing the absolute value of every octave.
pub fn noise3d_perlin_abs(
    x: f32,
    y: f32,
    z: f32,
    seed: i32,
    octaves: u32,
    persistence: f32,
) -> f32 {
    octave_sum(
        octaves,
        persistence,
        |f, s| noise3d_gradient(x * f, y * f, z * f, s).abs(),
        seed,
    )
}

/// Seeded 2D octave noise usable as a [`NoiseFn`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalNoise2 {
    pub seed: i32,
    pub octaves: u32,
    pub persistence: f32,
    /// Sum absolute octave values instead of signed ones.
    pub absolute: bool,
}

impl FractalNoise2 {
    /// Samples the noise at single precision.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        if self.absolute {
            noise2d_perlin_abs(x, y, self.seed, self.octaves, self.persistence)
        } else {
            noise2d_perlin(x, y, self.seed, self.octaves, self.persistence)
        }
    }
}

impl NoiseFn<f64, 2> for FractalNoise2 {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0] as f32, point[1] as f32) as f64
    }
}

/// Seeded 3D octave noise usable as a [`NoiseFn`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalNoise3 {
    pub seed: i32,
    pub octaves: u32,
    pub persistence: f32,
    /// Sum absolute octave values instead of signed ones.
    pub absolute: bool,
}

impl FractalNoise3 {
    /// Samples the noise at single precision.
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        if self.absolute {
            noise3d_perlin_abs(x, y, z, self.seed, self.octaves, self.persistence)
        } else {
            noise3d_perlin(x, y, z, self.seed, self.octaves, self.persistence)
        }
    }
}

impl NoiseFn<f64, 3> for FractalNoise3 {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.sample(point[0] as f32, point[1] as f32, point[2] as f32) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_values_are_deterministic_and_bounded() {
        for x in -20..20 {
            for y in -20..20 {
                let a = noise2d(x, y, 42);
                assert_eq!(a, noise2d(x, y, 42));
                assert!((-1.0..=1.0).contains(&a), "noise2d({x}, {y}) = {a}");

                let b = noise3d(x, y, x ^ y, -7);
                assert_eq!(b, noise3d(x, y, x ^ y, -7));
                assert!((-1.0..=1.0).contains(&b), "noise3d({x}, {y}) = {b}");
            }
        }
    }

    #[test]
    fn seed_changes_lattice() {
        let differing = (0..64).filter(|&i| noise2d(i, 3, 1) != noise2d(i, 3, 2)).count();
        assert!(differing > 32);
    }

    #[test]
    fn gradient_matches_lattice_at_integer_points() {
        for x in 1..10 {
            for y in 1..10 {
                let expected = noise2d(x, y, 5);
                let sampled = noise2d_gradient(x as f32, y as f32, 5);
                assert!((expected - sampled).abs() < 1e-5);

                let expected = noise3d(x, y, 3, 5);
                let sampled = noise3d_gradient(x as f32, y as f32, 3.0, 5);
                assert!((expected - sampled).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn gradient_stays_between_corner_values() {
        let v00 = noise2d(2, 2, 9);
        let v10 = noise2d(3, 2, 9);
        let v01 = noise2d(2, 3, 9);
        let v11 = noise2d(3, 3, 9);
        let lo = v00.min(v10).min(v01).min(v11);
        let hi = v00.max(v10).max(v01).max(v11);

        let sampled = noise2d_gradient(2.5, 2.25, 9);
        assert!(sampled >= lo - 1e-6 && sampled <= hi + 1e-6);
    }

    #[test]
    fn single_octave_equals_gradient() {
        assert_eq!(noise2d_perlin(1.3, -4.7, 11, 1, 0.5), noise2d_gradient(1.3, -4.7, 11));
        assert_eq!(
            noise3d_perlin_abs(0.3, 2.2, -1.1, 11, 1, 0.5),
            noise3d_gradient(0.3, 2.2, -1.1, 11).abs()
        );
    }

    #[test]
    fn octaves_use_successive_seeds() {
        let expected = noise2d_gradient(0.7, 0.2, 3) + 0.5 * noise2d_gradient(1.4, 0.4, 4);
        let sampled = noise2d_perlin(0.7, 0.2, 3, 2, 0.5);
        assert!((expected - sampled).abs() < 1e-6);
    }

    #[test]
    fn absolute_variant_is_never_negative() {
        for i in 0..100 {
            let x = i as f32 * 0.37 - 10.0;
            assert!(noise3d_perlin_abs(x, x * 0.5, -x, -42, 2, 1.0) >= 0.0);
            assert!(noise2d_perlin_abs(x, x * 0.5, -42, 3, 0.7) >= 0.0);
        }
    }

    #[test]
    fn noise_fn_wrappers_agree_with_functions() {
        let height = FractalNoise2 {
            seed: 42,
            octaves: 4,
            persistence: 2.38,
            absolute: false,
        };
        let sampled = height.get([0.25, -0.5]);
        assert_eq!(sampled as f32, noise2d_perlin(0.25, -0.5, 42, 4, 2.38));

        let material = FractalNoise3 {
            seed: -42,
            octaves: 2,
            persistence: 1.0,
            absolute: true,
        };
        let sampled = material.get([1.5, 0.25, -3.0]);
        assert_eq!(sampled as f32, noise3d_perlin_abs(1.5, 0.25, -3.0, -42, 2, 1.0));
    }
}
