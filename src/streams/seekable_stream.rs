use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// A seekable byte source the box walker can position explicitly
pub trait SeekableStream: Read + Seek {
    /// Total number of bytes handed out by `read` so far.
    fn bytes_read(&self) -> u64 {
        0
    }

    /// Human readable name of the source, used in log lines.
    fn describe(&self) -> String {
        "stream".to_string()
    }
}

// In-memory buffers, used by unit tests and by callers that already hold the file contents
impl<T: AsRef<[u8]>> SeekableStream for Cursor<T> {
    fn describe(&self) -> String {
        format!("memory buffer ({} bytes)", self.get_ref().as_ref().len())
    }
}

/// Local file wrapper
pub struct LocalSeekableStream {
    inner: BufReader<File>,
    name: String,
    bytes_read: u64,
}

impl LocalSeekableStream {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        Ok(LocalSeekableStream {
            inner: BufReader::new(File::open(path)?),
            name: path.display().to_string(),
            bytes_read: 0,
        })
    }
}

impl Read for LocalSeekableStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}

impl Seek for LocalSeekableStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl SeekableStream for LocalSeekableStream {
    fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}
