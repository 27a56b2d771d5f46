use super::{AdaptiveSpacing, ChordlineMarcher, ChordlineSample, March, Termination};
use crate::{Result, Surface, SurfacePoint3};

/// Chord lengths at three consecutive stations and the two steps between them, used to estimate
/// how quickly the chord length is changing along the span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingState {
    pub lengths: [f64; 3],
    pub steps: [f64; 2],
}

impl SpacingState {
    pub fn new(lengths: [f64; 3], steps: [f64; 2]) -> Self {
        Self { lengths, steps }
    }

    /// A finite difference estimate of the second derivative of chord length with respect to
    /// marched distance, on possibly uneven steps.
    pub fn curvature(&self) -> f64 {
        let [l0, l1, l2] = self.lengths;
        let [h0, h1] = self.steps;
        let d0 = (l1 - l0) / h0;
        let d1 = (l2 - l1) / h1;
        (d1 - d0) / (0.5 * (h0 + h1))
    }
}

impl<S: Surface + ?Sized> ChordlineMarcher<'_, S> {
    /// March from the root to the tip, picking each step from the local change of chord length.
    ///
    /// At every station two trial steps of half the target spacing are taken ahead of the
    /// current chordline. The second difference of the three chord lengths sets the next spacing
    /// through `AdaptiveSpacing::next_spacing`, so the stations bunch up where the planform
    /// curves and spread out where the chord length varies linearly. The trial steps are discarded
    /// unless one of them reaches the tip, in which case it becomes the final sample.
    ///
    /// # Arguments
    ///
    /// * `start`: a plane lying across the root of the guide surface, with its normal pointing
    ///   away from the direction of travel
    /// * `spacing`: the target spacing and curvature sensitivity
    ///
    /// returns: Result<March, WingError>
    pub fn march_adaptive(
        &self,
        start: &SurfacePoint3,
        spacing: &AdaptiveSpacing,
    ) -> Result<March> {
        spacing.validate()?;
        let half = 0.5 * spacing.target_spacing;

        let mut samples: Vec<ChordlineSample> = Vec::new();
        let mut current = self.initial_sample(start)?;

        for _ in 0..self.params().max_iterations {
            samples.push(current);

            let first = self.advance(&current.plane, half)?;
            if first.end_of_face {
                samples.push(first.sample);
                return Ok(March::new(samples, Termination::Tip));
            }
            let second = self.advance(&first.sample.plane, half)?;
            if second.end_of_face {
                samples.push(second.sample);
                return Ok(March::new(samples, Termination::Tip));
            }

            let state = SpacingState::new(
                [current.length(), first.sample.length(), second.sample.length()],
                [half, half],
            );
            let step = spacing.next_spacing(state.curvature());
            log::debug!(
                "Chord length curvature {:.3e}, next step {step:.4}",
                state.curvature()
            );

            let next = self.advance(&current.plane, step)?;
            if next.end_of_face {
                samples.push(next.sample);
                return Ok(March::new(samples, Termination::Tip));
            }
            current = next.sample;
        }

        log::warn!(
            "Adaptive march stopped after {} iterations without reaching the tip",
            self.params().max_iterations
        );
        Ok(March::new(samples, Termination::IterationCap))
    }
}
