use super::Record;

use std::{
    collections::VecDeque,
    fmt,
    pin::Pin,
    task::{Context, Poll},
};
use tokio_stream::{Stream, StreamExt};

/// A stream of records produced by a scan or lookup.
///
/// Holds an in-memory buffer, a lazy stream, or both; the buffer drains
/// first. Drivers backed by materialized data build it from a vector, others
/// from a stream.
#[derive(Default)]
pub struct RecordStream {
    buffer: Buffer,
    stream: Option<DynStream>,
}

#[derive(Default)]
enum Buffer {
    #[default]
    Empty,
    One(Record),
    Many(VecDeque<Record>),
}

type DynStream = Pin<Box<dyn Stream<Item = crate::Result<Record>> + Send + 'static>>;

struct Iter<I> {
    iter: I,
}

impl RecordStream {
    pub fn from_record(record: Record) -> Self {
        Self {
            buffer: Buffer::One(record),
            stream: None,
        }
    }

    pub fn from_vec(records: Vec<Record>) -> Self {
        Self {
            buffer: Buffer::Many(records.into()),
            stream: None,
        }
    }

    pub fn from_stream<T>(stream: T) -> Self
    where
        T: Stream<Item = crate::Result<Record>> + Send + 'static,
    {
        Self {
            buffer: Buffer::Empty,
            stream: Some(Box::pin(stream)),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<I>(iter: I) -> Self
    where
        I: Iterator<Item = crate::Result<Record>> + Send + 'static,
    {
        Self::from_stream(Iter { iter })
    }

    /// Returns the next record in the stream
    pub async fn next(&mut self) -> Option<crate::Result<Record>> {
        StreamExt::next(self).await
    }

    pub async fn collect(mut self) -> crate::Result<Vec<Record>> {
        let (min_len, _) = self.size_hint();
        let mut ret = Vec::with_capacity(min_len);

        while let Some(res) = self.next().await {
            ret.push(res?);
        }

        Ok(ret)
    }
}

impl Stream for RecordStream {
    type Item = crate::Result<Record>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some(next) = self.buffer.next() {
            Poll::Ready(Some(Ok(next)))
        } else if let Some(stream) = self.stream.as_mut() {
            Pin::new(stream).poll_next(cx)
        } else {
            Poll::Ready(None)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (mut low, mut high) = match &self.stream {
            Some(stream) => stream.size_hint(),
            None => (0, Some(0)),
        };

        let buffered = self.buffer.len();

        low += buffered;

        if let Some(high) = high.as_mut() {
            *high += buffered;
        }

        (low, high)
    }
}

impl From<Record> for RecordStream {
    fn from(src: Record) -> Self {
        Self::from_record(src)
    }
}

impl From<Vec<Record>> for RecordStream {
    fn from(src: Vec<Record>) -> Self {
        Self::from_vec(src)
    }
}

impl<I> Unpin for Iter<I> {}

impl<I> Stream for Iter<I>
where
    I: Iterator<Item = crate::Result<Record>>,
{
    type Item = crate::Result<Record>;

    fn poll_next(mut self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.iter.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl fmt::Debug for RecordStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStream").finish()
    }
}

impl Buffer {
    fn next(&mut self) -> Option<Record> {
        match std::mem::take(self) {
            Self::Empty => None,
            Self::One(record) => Some(record),
            Self::Many(mut records) => {
                let next = records.pop_front();
                *self = Self::Many(records);
                next
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Many(records) => records.len(),
        }
    }
}
