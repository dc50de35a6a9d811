//! Fixed bin tables and palettes.
//!
//! Each table is a list of brackets ordered coarse to fine. The first
//! bracket whose `above` threshold the magnitude statistic exceeds wins;
//! the last bracket has no threshold and catches everything else.

use precip_common::Color;

/// One row of a bracket table.
#[derive(Debug, Clone, Copy)]
pub struct Bracket {
    /// Statistic must be strictly greater than this to select the bracket
    pub above: Option<f64>,
    pub edges: &'static [f64],
    /// Tick labels, same length as `edges`, blank at both open ends
    pub labels: &'static [&'static str],
}

/// Open-ended sentinel standing in for infinity.
pub const OPEN_END: f64 = 1e200;

pub const ACCUMULATION_BRACKETS: [Bracket; 4] = [
    Bracket {
        above: Some(50.0),
        edges: &[
            0.0, 0.01, 2.5, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 50.0, 60.0, 70.0, 80.0,
            100.0, OPEN_END,
        ],
        labels: &[
            "", "0.01", "2.5", "5.0", "10", "15", "20", "25", "30", "35", "40", "50", "60", "70",
            "80", "100", "",
        ],
    },
    Bracket {
        above: Some(20.0),
        edges: &[
            0.0, 0.01, 0.5, 1.0, 2.0, 4.0, 6.0, 8.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0,
            50.0, OPEN_END,
        ],
        labels: &[
            "", "0.01", "0.50", "1.0", "2.0", "4.0", "6.0", "8.0", "10.0", "15.0", "20.0", "25.0",
            "30.0", "35.0", "40.0", "50.0", "",
        ],
    },
    Bracket {
        above: Some(10.0),
        edges: &[
            0.0, 0.01, 0.1, 0.25, 0.5, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0, 15.0, 20.0,
            OPEN_END,
        ],
        labels: &[
            "", "0.01", "0.10", "0.25", "0.50", "1.0", "1.5", "2.0", "3.0", "4.0", "5.0", "6.0",
            "8.0", "10", "15", "20", "",
        ],
    },
    Bracket {
        above: None,
        edges: &[
            0.0, 0.01, 0.1, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0,
            OPEN_END,
        ],
        labels: &[
            "", "0.01", "0.10", "0.25", "0.50", "0.75", "1.0", "1.5", "2.0", "2.5", "3.0", "4.0",
            "5.0", "6.0", "8.0", "10", "",
        ],
    },
];

// The innermost bin of each absolute bracket straddles zero and is the one
// hidden by the near-zero mask.
pub const ABSOLUTE_BRACKETS: [Bracket; 3] = [
    Bracket {
        above: Some(16.0),
        edges: &[
            -OPEN_END, -24.0, -16.0, -12.0, -8.0, -6.0, -4.0, -2.0, 2.0, 4.0, 6.0, 8.0, 12.0,
            16.0, 24.0, OPEN_END,
        ],
        labels: &[
            "", "-24", "-16", "-12", "-8", "-6", "-4", "-2", "2", "4", "6", "8", "12", "16", "24",
            "",
        ],
    },
    Bracket {
        above: Some(8.0),
        edges: &[
            -OPEN_END, -12.0, -8.0, -6.0, -4.0, -3.0, -2.0, -1.0, 1.0, 2.0, 3.0, 4.0, 6.0, 8.0,
            12.0, OPEN_END,
        ],
        labels: &[
            "", "-12", "-8", "-6", "-4", "-3", "-2", "-1", "1", "2", "3", "4", "6", "8", "12", "",
        ],
    },
    Bracket {
        above: None,
        edges: &[
            -OPEN_END, -6.0, -4.0, -3.0, -2.0, -1.5, -1.0, -0.5, 0.5, 1.0, 1.5, 2.0, 3.0, 4.0, 6.0,
            OPEN_END,
        ],
        labels: &[
            "", "-6", "-4", "-3", "-2", "-1.5", "-1", "-0.5", "0.5", "1", "1.5", "2", "3", "4", "6",
            "",
        ],
    },
];

pub const PERCENT_BRACKETS: [Bracket; 1] = [Bracket {
    above: None,
    edges: &[
        -OPEN_END, 0.0, 5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 100.0, 110.0, 130.0, 150.0, 200.0, 300.0,
        400.0, 600.0, OPEN_END,
    ],
    labels: &[
        "", "0", "5", "10", "25", "50", "75", "90", "100", "110", "130", "150", "200", "300", "400",
        "600", "",
    ],
}];

/// Palette for observed and normal accumulations.
pub const ACCUMULATION_COLORS: [Color; 16] = [
    Color::rgb(0x9a, 0x9a, 0x9a),
    Color::rgb(0x4b, 0xd2, 0xf7),
    Color::rgb(0x6a, 0xa0, 0xd0),
    Color::rgb(0x3c, 0x4b, 0xac),
    Color::rgb(0x3c, 0xf7, 0x4b),
    Color::rgb(0x3c, 0xb4, 0x47),
    Color::rgb(0x3c, 0x87, 0x43),
    Color::rgb(0xf7, 0xf7, 0x3c),
    Color::rgb(0xfb, 0xde, 0x88),
    Color::rgb(0xf7, 0xac, 0x3c),
    Color::rgb(0xf7, 0x3c, 0x3c),
    Color::rgb(0xbf, 0x3c, 0x3c),
    Color::rgb(0x9a, 0x3c, 0x3c),
    Color::rgb(0xf7, 0x3c, 0xf7),
    Color::rgb(0x9a, 0x74, 0xe5),
    Color::rgb(0xe1, 0xe1, 0xe1),
];

/// Diverging palette for departures: browns below normal, teals above.
pub const DEPARTURE_COLORS: [Color; 16] = [
    Color::rgb(0x54, 0x30, 0x05),
    Color::rgb(0x7a, 0x43, 0x08),
    Color::rgb(0x8c, 0x51, 0x0a),
    Color::rgb(0xa6, 0x67, 0x1b),
    Color::rgb(0xbf, 0x81, 0x2d),
    Color::rgb(0xdf, 0xc2, 0x7d),
    Color::rgb(0xf6, 0xe8, 0xc3),
    Color::rgb(0xf5, 0xf5, 0xf5),
    Color::rgb(0xf5, 0xf5, 0xf5),
    Color::rgb(0xc7, 0xea, 0xe5),
    Color::rgb(0x80, 0xcd, 0xc1),
    Color::rgb(0x35, 0x97, 0x8f),
    Color::rgb(0x01, 0x80, 0x73),
    Color::rgb(0x01, 0x66, 0x5e),
    Color::rgb(0x00, 0x4d, 0x45),
    Color::rgb(0x00, 0x3c, 0x30),
];
