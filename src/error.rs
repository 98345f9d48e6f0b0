// One error type for the whole app.
// Every variant states *where* things went wrong; the point/timer core never fails.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the framebuffer to the window failed
    #[error("Image load error: {0}")]
    ImageLoad(String), // Opening/decoding the background picture failed
    #[error("Config error: {0}")]
    Config(String), // A ScratchConfig value is out of range
    #[error("Frame size error: {0}")]
    FrameSize(String), // Buffers handed to the compositor disagree on dimensions
}
