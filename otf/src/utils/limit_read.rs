use std::io;

/// Reads at most `limit` bytes from `inner`, used to confine a table reader to the table's
/// length as given by its table record.
pub struct LimitRead<T: io::Read> {
    inner: T,
    limit: usize,
    already_read: usize,
}

impl<T> LimitRead<T>
where
    T: io::Read,
{
    pub fn new(inner: T, limit: usize) -> Self {
        Self {
            inner,
            limit,
            already_read: 0,
        }
    }
}

impl<T> io::Read for LimitRead<T>
where
    T: io::Read,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.already_read == self.limit {
            return Ok(0);
        }

        let cap = buf.len().min(self.limit - self.already_read);
        let n = self.inner.read(&mut buf[..cap])?;
        self.already_read += n;
        Ok(n)
    }
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, Read};

    use super::*;

    #[test]
    fn test_limit_read() {
        let mut cursor = Cursor::new(b"headname-table-trailer".to_vec());
        cursor.set_position(4);
        let mut rd = LimitRead::new(cursor.by_ref(), 10);

        let mut buf = [0; 4];
        assert_eq!((rd.read(&mut buf).unwrap(), &buf), (4, b"name"));
        assert_eq!((rd.read(&mut buf).unwrap(), &buf), (4, b"-tab"));
        assert_eq!((rd.read(&mut buf).unwrap(), &buf[..2]), (2, &b"le"[..]));
        assert_eq!(rd.read(&mut buf).unwrap(), 0);
        assert_eq!(cursor.position(), 14);
    }

    #[test]
    fn test_read_to_end_stops_at_limit() {
        let mut rd = LimitRead::new(Cursor::new(b"foobar".to_vec()), 3);
        let mut rest = Vec::new();
        rd.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"foo");
    }
}
