use crate::timer::TimerKind;

/// Audible (or otherwise noticeable) signal fired once per timer completion.
/// Tone synthesis lives in the front-end; the core only decides when.
pub trait CompletionCue {
    fn play(&mut self, timer: TimerKind);
}

/// Cue that does nothing, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCue;

impl CompletionCue for SilentCue {
    fn play(&mut self, _timer: TimerKind) {}
}
