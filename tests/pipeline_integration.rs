//! Integration tests for pipeline files
//!
//! Loads the shipped pipeline and checks the composed transform end to end.

use affine3::{Matrix, TransformPipeline, TransformStep, Vector};

fn vec_approx_eq(a: Vector, b: Vector) -> bool {
    (a - b).length() < 0.0001
}

#[test]
fn test_default_pipeline() {
    let pipeline = TransformPipeline::load("pipelines/default.ron").unwrap();
    assert_eq!(pipeline.name, "default");
    assert_eq!(pipeline.steps.len(), 3);

    let results = pipeline.apply().unwrap();
    assert_eq!(results.len(), pipeline.points.len());

    // Origin only picks up the translation
    assert!(vec_approx_eq(results[0].1, Vector::new(0.0, 0.0, 5.0)));
    // X turns to Y, doubles, then moves back
    assert!(vec_approx_eq(results[1].1, Vector::new(0.0, 2.0, 5.0)), "got {}", results[1].1);
}

#[test]
fn test_pipeline_matches_manual_composition() {
    let pipeline = TransformPipeline::new("manual")
        .with_step(TransformStep::scale(3.0))
        .with_step(TransformStep::rotate(45.0, [0.0, 1.0, 0.0]))
        .with_step(TransformStep::translate(1.0, 2.0, 3.0));

    let expected = Matrix::translate(1.0, 2.0, 3.0)
        * Matrix::rotate(std::f32::consts::FRAC_PI_4, Vector::Y)
        * Matrix::scale(3.0);

    let composed = pipeline.compose().unwrap();
    let p = Vector::new(0.5, -1.0, 2.0);
    assert!(vec_approx_eq(composed.transform(p), expected.transform(p)));
}
