use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use lumafilter_image::{PlaneSize, VideoFormat, VideoFrame};

use crate::error::VideoFilterError;

/// Reads tightly packed planar frames from a byte stream.
///
/// Every frame is the luma plane followed by both chroma planes, without
/// padding between rows.
pub struct RawVideoReader<R> {
    reader: R,
    format: VideoFormat,
    size: PlaneSize,
    buf: Vec<u8>,
    frames: u64,
}

impl RawVideoReader<BufReader<File>> {
    /// Open a raw video file.
    pub fn open(
        path: impl AsRef<Path>,
        format: VideoFormat,
        size: PlaneSize,
    ) -> Result<Self, VideoFilterError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), format, size))
    }
}

impl<R: Read> RawVideoReader<R> {
    /// Read frames of `format` and `size` from `reader`.
    pub fn new(reader: R, format: VideoFormat, size: PlaneSize) -> Self {
        Self {
            reader,
            format,
            size,
            buf: vec![0; VideoFrame::frame_len(format, size)],
            frames: 0,
        }
    }

    /// Number of frames read so far.
    pub fn frames_read(&self) -> u64 {
        self.frames
    }

    /// Read the next frame.
    ///
    /// Returns `Ok(None)` at the end of the stream.
    ///
    /// # Errors
    ///
    /// Returns [`VideoFilterError::TruncatedFrame`] if the stream ends inside a frame.
    pub fn read_frame(&mut self) -> Result<Option<VideoFrame>, VideoFilterError> {
        let mut filled = 0;
        while filled < self.buf.len() {
            match self.reader.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if filled == 0 {
            return Ok(None);
        }
        if filled < self.buf.len() {
            return Err(VideoFilterError::TruncatedFrame(filled, self.buf.len()));
        }

        self.frames += 1;
        Ok(Some(VideoFrame::from_bytes(self.format, self.size, &self.buf)?))
    }
}

impl<R: Read> Iterator for RawVideoReader<R> {
    type Item = Result<VideoFrame, VideoFilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_frame().transpose()
    }
}

/// Writes frames as tightly packed planes.
pub struct RawVideoWriter<W: Write> {
    writer: W,
    frames: u64,
}

impl RawVideoWriter<BufWriter<File>> {
    /// Create or truncate a raw video file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, VideoFilterError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RawVideoWriter<W> {
    /// Write frames to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    /// Write a frame, dropping any row padding.
    pub fn write_frame(&mut self, frame: &VideoFrame) -> Result<(), VideoFilterError> {
        self.writer.write_all(&frame.to_bytes())?;
        self.frames += 1;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), VideoFilterError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W, VideoFilterError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_frames_until_eof() -> Result<(), VideoFilterError> {
        let size: PlaneSize = [4, 2].into();
        let frame_len = VideoFrame::frame_len(VideoFormat::I420, size);
        assert_eq!(frame_len, 8 + 2 + 2);

        let bytes = (0..2 * frame_len).map(|i| i as u8).collect::<Vec<_>>();
        let reader = RawVideoReader::new(bytes.as_slice(), VideoFormat::I420, size);

        let frames = reader.collect::<Result<Vec<_>, _>>()?;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].plane_data(0), &bytes[12..20]);
        assert_eq!(frames[1].plane_data(2), &bytes[22..24]);
        Ok(())
    }

    #[test]
    fn truncated_frame() {
        let size: PlaneSize = [4, 2].into();
        let bytes = [0u8; 17];
        let mut reader = RawVideoReader::new(&bytes[..], VideoFormat::I420, size);

        assert!(matches!(reader.read_frame(), Ok(Some(_))));
        assert!(matches!(
            reader.read_frame(),
            Err(VideoFilterError::TruncatedFrame(5, 12))
        ));
    }

    #[test]
    fn write_drops_stride_padding() -> Result<(), VideoFilterError> {
        let size: PlaneSize = [2, 2].into();
        let frame = VideoFrame::with_strides(VideoFormat::I420, size, [4, 3, 3], 9)?;

        let mut writer = RawVideoWriter::new(Vec::new());
        writer.write_frame(&frame)?;
        assert_eq!(writer.frames_written(), 1);
        assert_eq!(writer.into_inner()?, vec![9u8; 6]);
        Ok(())
    }

    #[test]
    fn file_round_trip() -> Result<(), VideoFilterError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("clip.yuv");
        let size: PlaneSize = [6, 4].into();

        let frame = VideoFrame::from_size_val(VideoFormat::I420, size, 42)?;
        let mut writer = RawVideoWriter::create(&path)?;
        writer.write_frame(&frame)?;
        writer.write_frame(&frame)?;
        writer.flush()?;

        let mut reader = RawVideoReader::open(&path, VideoFormat::I420, size)?;
        assert_eq!(reader.read_frame()?, Some(frame.clone()));
        assert_eq!(reader.read_frame()?, Some(frame));
        assert_eq!(reader.read_frame()?, None);
        assert_eq!(reader.frames_read(), 2);
        Ok(())
    }
}
