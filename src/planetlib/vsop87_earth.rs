//! Embedded VSOP87D series for the Earth
//!
//! Heliocentric ecliptic coordinates of the Earth referred to the mean
//! equinox of date, truncated to the terms published in Meeus, *Astronomical
//! Algorithms* (2nd ed.), Appendix III. Each row is
//! `[amplitude, phase (rad), frequency (rad per Julian millennium)]`.

use super::vsop87::{OrbitSeries, SeriesTerm};
use lazy_static::lazy_static;

/// Earth L0 terms (radians, multiplied by T^0)
const EARTH_L0: &[[f64; 3]] = &[
    [175347046e-8, 0.0, 0.0],
    [3341656e-8, 4.6692568, 6283.0758500],
    [34894e-8, 4.62610, 12566.15170],
    [3497e-8, 2.7441, 5753.3849],
    [3418e-8, 2.8289, 3.5231],
    [3136e-8, 3.6277, 77713.7715],
    [2676e-8, 4.4181, 7860.4194],
    [2343e-8, 6.1352, 3930.2097],
    [1324e-8, 0.7425, 11506.7698],
    [1273e-8, 2.0371, 529.6910],
    [1199e-8, 1.1096, 1577.3435],
    [990e-8, 5.233, 5884.927],
    [902e-8, 2.045, 26.298],
    [857e-8, 3.508, 398.149],
    [780e-8, 1.179, 5223.694],
    [753e-8, 2.533, 5507.553],
    [505e-8, 4.583, 18849.228],
    [492e-8, 4.205, 775.523],
    [357e-8, 2.920, 0.067],
    [317e-8, 5.849, 11790.629],
    [284e-8, 1.899, 796.298],
    [271e-8, 0.315, 10977.079],
    [243e-8, 0.345, 5486.778],
    [206e-8, 4.806, 2544.314],
    [205e-8, 1.869, 5573.143],
    [203e-8, 2.458, 6069.777],
    [156e-8, 0.833, 213.299],
    [132e-8, 3.411, 2942.463],
    [126e-8, 1.083, 20.775],
    [115e-8, 0.645, 0.980],
    [103e-8, 0.636, 4694.003],
    [102e-8, 0.976, 15720.839],
    [102e-8, 4.267, 7.114],
    [99e-8, 6.21, 2146.17],
    [98e-8, 0.68, 155.42],
    [86e-8, 5.98, 161000.69],
    [85e-8, 1.30, 6275.96],
    [85e-8, 3.67, 71430.70],
    [80e-8, 1.81, 17260.15],
    [79e-8, 3.04, 12036.46],
    [75e-8, 1.76, 5088.63],
    [74e-8, 3.50, 3154.69],
    [74e-8, 4.68, 801.82],
    [70e-8, 0.83, 9437.76],
    [62e-8, 3.98, 8827.39],
    [61e-8, 1.82, 7084.90],
    [57e-8, 2.78, 6286.60],
    [56e-8, 4.39, 14143.50],
    [56e-8, 3.47, 6279.55],
    [52e-8, 0.19, 12139.55],
    [52e-8, 1.33, 1748.02],
    [51e-8, 0.28, 5856.48],
    [49e-8, 0.49, 1194.45],
    [41e-8, 5.37, 8429.24],
    [41e-8, 2.40, 19651.05],
    [39e-8, 6.17, 10447.39],
    [37e-8, 6.04, 10213.29],
    [37e-8, 2.57, 1059.38],
    [36e-8, 1.71, 2352.87],
    [36e-8, 1.78, 6812.77],
    [33e-8, 0.59, 17789.85],
    [30e-8, 0.44, 83996.85],
    [30e-8, 2.74, 1349.87],
    [25e-8, 3.16, 4690.48],
];

/// Earth L1 terms (radians, multiplied by T^1)
const EARTH_L1: &[[f64; 3]] = &[
    [628331966747e-8, 0.0, 0.0],
    [206059e-8, 2.678235, 6283.075850],
    [4303e-8, 2.6351, 12566.1517],
    [425e-8, 1.590, 3.523],
    [119e-8, 5.796, 26.298],
    [109e-8, 2.966, 1577.344],
    [93e-8, 2.59, 18849.23],
    [72e-8, 1.14, 529.69],
    [68e-8, 1.87, 398.15],
    [67e-8, 4.41, 5507.55],
    [59e-8, 2.89, 5223.69],
    [56e-8, 2.17, 155.42],
    [45e-8, 0.40, 796.30],
    [36e-8, 0.47, 775.52],
    [29e-8, 2.65, 7.11],
    [21e-8, 5.34, 0.98],
    [19e-8, 1.85, 5486.78],
    [19e-8, 4.97, 213.30],
    [17e-8, 2.99, 6275.96],
    [16e-8, 0.03, 2544.31],
    [16e-8, 1.43, 2146.17],
    [15e-8, 1.21, 10977.08],
    [12e-8, 2.83, 1748.02],
    [12e-8, 3.26, 5088.63],
    [12e-8, 5.27, 1194.45],
    [12e-8, 2.08, 4694.00],
    [11e-8, 0.77, 553.57],
    [10e-8, 1.30, 6286.60],
    [10e-8, 4.24, 1349.87],
    [9e-8, 2.70, 242.73],
    [9e-8, 5.64, 951.72],
    [8e-8, 5.30, 2352.87],
    [6e-8, 2.65, 9437.76],
    [6e-8, 4.67, 4690.48],
];

/// Earth L2 terms (radians, multiplied by T^2)
const EARTH_L2: &[[f64; 3]] = &[
    [52919e-8, 0.0, 0.0],
    [8720e-8, 1.0721, 6283.0758],
    [309e-8, 0.867, 12566.152],
    [27e-8, 0.05, 3.52],
    [16e-8, 5.19, 26.30],
    [16e-8, 3.68, 155.42],
    [10e-8, 0.76, 18849.23],
    [9e-8, 2.06, 77713.77],
    [7e-8, 0.83, 775.52],
    [5e-8, 4.66, 1577.34],
    [4e-8, 1.03, 7.11],
    [4e-8, 3.44, 5573.14],
    [3e-8, 5.14, 796.30],
    [3e-8, 6.05, 5507.55],
    [3e-8, 1.19, 242.73],
    [3e-8, 6.12, 529.69],
    [3e-8, 0.31, 398.15],
    [3e-8, 2.28, 553.57],
    [2e-8, 4.38, 5223.69],
    [2e-8, 3.75, 0.98],
];

/// Earth L3 terms (radians, multiplied by T^3)
const EARTH_L3: &[[f64; 3]] = &[
    [289e-8, 5.844, 6283.076],
    [35e-8, 0.0, 0.0],
    [17e-8, 5.49, 12566.15],
    [3e-8, 5.20, 155.42],
    [1e-8, 4.72, 3.52],
    [1e-8, 5.30, 18849.23],
    [1e-8, 5.97, 242.73],
];

/// Earth L4 terms (radians, multiplied by T^4)
const EARTH_L4: &[[f64; 3]] = &[
    [114e-8, 3.142, 0.0],
    [8e-8, 4.13, 6283.08],
    [1e-8, 3.84, 12566.15],
];

/// Earth L5 terms (radians, multiplied by T^5)
const EARTH_L5: &[[f64; 3]] = &[
    [1e-8, 3.14, 0.0],
];

/// Earth B0 terms (radians, multiplied by T^0)
const EARTH_B0: &[[f64; 3]] = &[
    [280e-8, 3.199, 84334.662],
    [102e-8, 5.422, 5507.553],
    [80e-8, 3.88, 5223.69],
    [44e-8, 3.70, 2352.87],
    [32e-8, 4.00, 1577.34],
];

/// Earth B1 terms (radians, multiplied by T^1)
const EARTH_B1: &[[f64; 3]] = &[
    [9e-8, 3.90, 5507.55],
    [6e-8, 1.73, 5223.69],
];

/// Earth R0 terms (AU, multiplied by T^0)
const EARTH_R0: &[[f64; 3]] = &[
    [100013989e-8, 0.0, 0.0],
    [1670700e-8, 3.0984635, 6283.0758500],
    [13956e-8, 3.05525, 12566.15170],
    [3084e-8, 5.1985, 77713.7715],
    [1628e-8, 1.1739, 5753.3849],
    [1576e-8, 2.8469, 7860.4194],
    [925e-8, 5.453, 11506.770],
    [542e-8, 4.564, 3930.210],
    [472e-8, 3.661, 5884.927],
    [346e-8, 0.964, 5507.553],
    [329e-8, 5.900, 5223.694],
    [307e-8, 0.299, 5573.143],
    [243e-8, 4.273, 11790.629],
    [212e-8, 5.847, 1577.344],
    [186e-8, 5.022, 10977.079],
    [175e-8, 3.012, 18849.228],
    [110e-8, 5.055, 5486.778],
    [98e-8, 0.89, 6069.78],
    [86e-8, 5.69, 15720.84],
    [86e-8, 1.27, 161000.69],
    [65e-8, 0.27, 17260.15],
    [63e-8, 0.92, 529.69],
    [57e-8, 2.01, 83996.85],
    [56e-8, 5.24, 71430.70],
    [49e-8, 3.25, 2544.31],
    [47e-8, 2.58, 775.52],
    [45e-8, 5.54, 9437.76],
    [43e-8, 6.01, 6275.96],
    [39e-8, 5.36, 4694.00],
    [38e-8, 2.39, 8827.39],
    [37e-8, 0.83, 19651.05],
    [37e-8, 4.90, 12139.55],
    [36e-8, 1.67, 12036.46],
    [35e-8, 1.84, 2942.46],
    [33e-8, 0.24, 7084.90],
    [32e-8, 0.18, 5088.63],
    [32e-8, 1.78, 398.15],
    [28e-8, 1.21, 6286.60],
    [28e-8, 1.90, 6279.55],
    [26e-8, 4.59, 10447.39],
];

/// Earth R1 terms (AU, multiplied by T^1)
const EARTH_R1: &[[f64; 3]] = &[
    [103019e-8, 1.107490, 6283.075850],
    [1721e-8, 1.0644, 12566.1517],
    [702e-8, 3.142, 0.0],
    [32e-8, 1.02, 18849.23],
    [31e-8, 2.84, 5507.55],
    [25e-8, 1.32, 5223.69],
    [18e-8, 1.42, 1577.34],
    [10e-8, 5.91, 10977.08],
    [9e-8, 1.42, 6275.96],
    [9e-8, 0.27, 5486.78],
];

/// Earth R2 terms (AU, multiplied by T^2)
const EARTH_R2: &[[f64; 3]] = &[
    [4359e-8, 5.7846, 6283.0758],
    [124e-8, 5.579, 12566.152],
    [12e-8, 3.14, 0.0],
    [9e-8, 3.63, 77713.77],
    [6e-8, 1.87, 5573.14],
    [3e-8, 5.47, 18849.23],
];

/// Earth R3 terms (AU, multiplied by T^3)
const EARTH_R3: &[[f64; 3]] = &[
    [145e-8, 4.273, 6283.076],
    [7e-8, 3.92, 12566.15],
];

/// Earth R4 terms (AU, multiplied by T^4)
const EARTH_R4: &[[f64; 3]] = &[
    [4e-8, 2.56, 6283.08],
];

fn to_blocks(tables: &[&[[f64; 3]]]) -> Vec<Vec<SeriesTerm>> {
    tables
        .iter()
        .map(|rows| {
            rows.iter()
                .map(|&[amplitude, phase, frequency]| SeriesTerm(amplitude, phase, frequency))
                .collect()
        })
        .collect()
}

lazy_static! {
    /// The Earth's L, B and R series
    pub static ref EARTH: OrbitSeries = OrbitSeries {
        l: to_blocks(&[EARTH_L0, EARTH_L1, EARTH_L2, EARTH_L3, EARTH_L4, EARTH_L5]),
        b: to_blocks(&[EARTH_B0, EARTH_B1]),
        r: to_blocks(&[EARTH_R0, EARTH_R1, EARTH_R2, EARTH_R3, EARTH_R4]),
    };
}
