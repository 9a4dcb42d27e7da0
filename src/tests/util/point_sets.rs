pub fn square_with_center() -> Vec<[f64; 2]> {
    vec![[0., 0.], [10., 0.], [10., 10.], [0., 10.], [5., 5.]]
}

/// Four points on the unit circle
pub fn cocircular() -> Vec<[f64; 2]> {
    vec![[1., 0.], [0., 1.], [-1., 0.], [0., -1.]]
}

/// A triangle with a fourth point on the middle of its base
pub fn collinear_with_apex() -> Vec<[f64; 2]> {
    vec![[0., 0.], [10., 0.], [5., 5.], [5., 0.]]
}

/// The corners of a regular `n`-gon followed by its center
pub fn regular_polygon(n: usize, radius: f64) -> Vec<[f64; 2]> {
    let mut points: Vec<[f64; 2]> = (0..n)
        .map(|i| {
            let theta = std::f64::consts::PI * 2. * (i as f64) / (n as f64);
            let (y, x) = theta.sin_cos();
            [x * radius, y * radius]
        })
        .collect();
    points.push([0., 0.]);
    points
}

/// An `n` by `n` lattice with unit spacing, row by row from the origin
pub fn grid(n: usize) -> Vec<[f64; 2]> {
    (0..n * n).map(|i| [(i % n) as f64, (i / n) as f64]).collect()
}

/// Every named point set
pub fn all() -> Vec<(&'static str, Vec<[f64; 2]>)> {
    vec![
        ("square_with_center", square_with_center()),
        ("cocircular", cocircular()),
        ("collinear_with_apex", collinear_with_apex()),
        ("hexagon", regular_polygon(6, 100.)),
        ("dodecagon", regular_polygon(12, 100.)),
        ("grid", grid(6)),
    ]
}
