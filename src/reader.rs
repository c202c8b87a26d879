use crate::{ClassFileResult, StructuralError};

/// Sequential big-endian cursor over the raw class file bytes.
#[derive(Clone)]
pub(crate) struct ByteReader<'class> {
    data: &'class [u8],
    pos: usize,
}

impl<'class> ByteReader<'class> {
    pub(crate) fn new(data: &'class [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    fn read_array<const N: usize>(&mut self) -> ClassFileResult<[u8; N]> {
        if self.pos + N > self.data.len() {
            return Err(StructuralError::UnexpectedEof {
                position: self.pos,
                len: self.data.len(),
            }
            .into());
        }
        // SAFETY: the bounds check above guarantees the slice has length N
        let result =
            unsafe { self.data[self.pos..self.pos + N].try_into().unwrap_unchecked() };
        self.pos += N;
        Ok(result)
    }

    pub(crate) fn read_u8(&mut self) -> ClassFileResult<u8> {
        Ok(u8::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_u16(&mut self) -> ClassFileResult<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_u32(&mut self) -> ClassFileResult<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_u64(&mut self) -> ClassFileResult<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_i8(&mut self) -> ClassFileResult<i8> {
        Ok(i8::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_i16(&mut self) -> ClassFileResult<i16> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_i32(&mut self) -> ClassFileResult<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_bytes(&mut self, length: usize) -> ClassFileResult<&'class [u8]> {
        if self.pos + length > self.data.len() {
            return Err(StructuralError::UnexpectedEof {
                position: self.pos,
                len: self.data.len(),
            }
            .into());
        }
        let result = &self.data[self.pos..self.pos + length];
        self.pos += length;
        Ok(result)
    }

    pub(crate) fn skip(&mut self, length: usize) -> ClassFileResult<()> {
        self.read_bytes(length)?;
        Ok(())
    }
}
