// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Redraw port between the editor session and whatever paints it.

/// Asked to redraw whenever the session's visible state changes.
///
/// Implementations should be cheap; a UI shell usually just marks its canvas
/// and preview frame dirty.
pub trait RenderPort {
    /// Request a redraw of the canvas and preview.
    fn request_redraw(&self);
}
