/// Something that shows where the agent currently is
///
/// Agents call [`render`](Render::render) after every transition of every episode, so implementations
/// must be cheap to call repeatedly and must not influence learning. Closures taking the state work
/// as renderers, which is convenient for recording trajectories in tests.
pub trait Render {
    fn render(&mut self, state: usize);
}

/// Renders nothing, for headless training
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRender;

impl Render for NoRender {
    fn render(&mut self, _state: usize) {}
}

impl<F: FnMut(usize)> Render for F {
    fn render(&mut self, state: usize) {
        self(state)
    }
}
