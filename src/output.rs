//! In‑memory print sink that can be read back while the interpreter still
//! owns a handle to it.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use bytes::BytesMut;

#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Rc<RefCell<BytesMut>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.borrow()).into_owned()
    }

    /// Take everything written so far, leaving the buffer empty.
    pub fn take(&self) -> String {
        let bytes = self.inner.borrow_mut().split().freeze();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
