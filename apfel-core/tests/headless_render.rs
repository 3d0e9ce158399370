use apfel_core::{Complex, Explorer, ExplorerConfig, Fractal, IterationBudget, Mandelbrot, Viewport};

/// Evaluate every pixel of a viewport and collect counts in row-major order.
fn render_grid<F: Fractal>(fractal: &F, viewport: &Viewport, budget: &IterationBudget) -> Vec<u32> {
    let mut results = Vec::with_capacity((viewport.width * viewport.height) as usize);
    for py in 0..viewport.height {
        for px in 0..viewport.width {
            let c = viewport.pixel_to_complex(px, py);
            results.push(fractal.iterate(c, budget));
        }
    }
    results
}

#[test]
fn headless_mandelbrot_render() {
    let budget = IterationBudget::default();
    let viewport = Viewport::default_mandelbrot(100, 100);

    let results = render_grid(&Mandelbrot, &viewport, &budget);

    assert_eq!(results.len(), 100 * 100);
    let bounded = results.iter().filter(|&&n| n == 100).count();
    let escaped = results.iter().filter(|&&n| n < 100).count();
    assert!(bounded > 0, "should have some bounded points");
    assert!(escaped > 0, "should have some escaped points");
    assert_eq!(bounded + escaped, 10_000);
}

#[test]
fn headless_render_is_deterministic() {
    let budget = IterationBudget::default();
    let viewport = Viewport::default_mandelbrot(80, 60);

    let run1 = render_grid(&Mandelbrot, &viewport, &budget);
    let run2 = render_grid(&Mandelbrot, &viewport, &budget);

    assert_eq!(run1, run2, "two identical renders must produce identical results");
}

#[test]
fn headless_julia_render() {
    // Basilica: c = -1 lies in the period-2 bulb, so its Julia set has interior.
    let julia = apfel_core::Julia::new(Complex::new(-1.0, 0.0));
    let viewport = Viewport::default_julia(100, 100);
    let budget = IterationBudget::default();

    let results = render_grid(&julia, &viewport, &budget);

    assert!(results.iter().any(|&n| n == 100), "should have some bounded points");
    assert!(results.iter().any(|&n| n < 100), "should have some escaped points");
}

#[test]
fn zoom_session_stays_well_formed() {
    let mut explorer = Explorer::new(ExplorerConfig::default(), 800, 800).unwrap();
    let pointer_path = [(100.0, 700.0), (650.0, 120.0), (400.0, 400.0), (799.0, 0.0)];

    for (i, &(px, py)) in pointer_path.iter().cycle().take(200).enumerate() {
        explorer.pointer_moved(px, py);
        let delta = if i % 5 == 4 { -120.0 } else { 60.0 };
        explorer.scrolled(delta).unwrap();

        let b = explorer.viewport().bounds();
        assert!(b.re_min < b.re_max && b.im_min < b.im_max);
        assert!(explorer.budget().max_iterations() >= 1);
    }

    // 160 zoom-ins of +0.75 and 40 zoom-outs of -1.5.
    assert_eq!(explorer.budget().max_iterations(), 160);
    assert!(explorer.viewport().half_span() < 2.0);
}

#[test]
fn deep_zoom_stops_before_bounds_collapse() {
    let mut explorer = Explorer::new(ExplorerConfig::default(), 800, 800).unwrap();
    explorer.pointer_moved(400.0, 400.0);

    let mut rejected = false;
    for _ in 0..40 {
        // Clamped to the minimum factor of 0.1 per event.
        let before = explorer.snapshot();
        match explorer.scrolled(2000.0) {
            Ok(applied) => assert!(applied),
            Err(_) => {
                rejected = true;
                assert_eq!(explorer.snapshot(), before);
            }
        }
        let b = explorer.viewport().bounds();
        assert!(b.re_min < b.re_max, "re collapsed: {b:?}");
        assert!(b.im_min < b.im_max, "im collapsed: {b:?}");
    }
    assert!(rejected, "zoom past f64 resolution should be refused");
}

#[test]
fn pointer_on_bounded_point_keeps_it_under_cursor() {
    let mut explorer = Explorer::new(ExplorerConfig::default(), 800, 800).unwrap();
    // Pixel (500, 400) is the origin of the startup view.
    explorer.pointer_moved(500.0, 400.0);
    for _ in 0..50 {
        explorer.scrolled(100.0).unwrap();
    }
    let c = explorer.viewport().to_complex(500.0, 400.0);
    assert!(c.re.abs() < 1e-12 && c.im.abs() < 1e-12, "origin drifted to {c}");
    assert_eq!(
        Mandelbrot.iterate(Complex::ZERO, explorer.budget()),
        explorer.budget().max_iterations()
    );
}
