/// Splits a byte stream into delimiter-terminated frames.
///
/// Bytes after the last delimiter stay buffered until the next push.
pub(crate) struct FrameSplitter {
    delimiter: u8,
    buffer: Vec<u8>,
}

impl FrameSplitter {
    pub(crate) fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            buffer: Vec::new(),
        }
    }

    /// Feed `bytes` and return every frame completed by them.
    ///
    /// Frames exclude the delimiter and a trailing carriage return, and are
    /// decoded lossily so a stray byte never drops a whole frame.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut frames = Vec::new();

        for &byte in bytes {
            if byte == self.delimiter {
                let mut frame = std::mem::take(&mut self.buffer);
                if frame.last() == Some(&b'\r') {
                    frame.pop();
                }
                frames.push(String::from_utf8_lossy(&frame).into_owned());
            } else {
                self.buffer.push(byte);
            }
        }

        frames
    }

    pub(crate) fn pending(&self) -> usize {
        self.buffer.len()
    }
}
