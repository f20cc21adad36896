use std::{
    borrow::Cow,
    ffi::{CStr, CString},
    rc::Rc,
    sync::Arc,
};

/// Any type implementing `AsBytes` can be decomposed into bytes.
///
/// The primary purpose of this trait is to allow different types to be used
/// as keys on the [`crate::RadixMap`] type. Key equality and traversal
/// order are both defined entirely by the returned byte string.
pub trait AsBytes {
    /// View the current value as a byte array.
    fn as_bytes(&self) -> &[u8];
}

impl AsBytes for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> AsBytes for [u8; N] {
    fn as_bytes(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsBytes for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsBytes for str {
    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

impl AsBytes for String {
    fn as_bytes(&self) -> &[u8] {
        String::as_bytes(self)
    }
}

/// The trailing NUL byte is not part of the key.
impl AsBytes for CStr {
    fn as_bytes(&self) -> &[u8] {
        self.to_bytes()
    }
}

impl AsBytes for CString {
    fn as_bytes(&self) -> &[u8] {
        self.as_c_str().as_bytes()
    }
}

impl<B> AsBytes for Cow<'_, B>
where
    B: AsBytes + ToOwned + ?Sized,
{
    fn as_bytes(&self) -> &[u8] {
        B::as_bytes(self.as_ref())
    }
}

impl<T> AsBytes for &T
where
    T: AsBytes + ?Sized,
{
    fn as_bytes(&self) -> &[u8] {
        T::as_bytes(self)
    }
}

impl<T> AsBytes for &mut T
where
    T: AsBytes + ?Sized,
{
    fn as_bytes(&self) -> &[u8] {
        T::as_bytes(self)
    }
}

impl<T> AsBytes for Box<T>
where
    T: AsBytes + ?Sized,
{
    fn as_bytes(&self) -> &[u8] {
        T::as_bytes(self)
    }
}

impl<T> AsBytes for Rc<T>
where
    T: AsBytes + ?Sized,
{
    fn as_bytes(&self) -> &[u8] {
        T::as_bytes(self)
    }
}

impl<T> AsBytes for Arc<T>
where
    T: AsBytes + ?Sized,
{
    fn as_bytes(&self) -> &[u8] {
        T::as_bytes(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_like_types_agree() {
        let owned = String::from("key");
        assert_eq!(AsBytes::as_bytes("key"), b"key");
        assert_eq!(owned.as_bytes(), b"key");
        assert_eq!(Cow::Borrowed("key").as_bytes(), b"key");
        assert_eq!(Box::<str>::from("key").as_bytes(), b"key");
    }

    #[test]
    fn cstr_drops_trailing_nul() {
        let c = CString::new("key").unwrap();
        assert_eq!(c.as_bytes(), b"key");
        assert_eq!(c.as_c_str().as_bytes(), b"key");
    }

    #[test]
    fn byte_containers_agree() {
        let bytes = [1u8, 2, 3];
        let v = vec![1u8, 2, 3];
        assert_eq!(v.as_bytes(), &bytes);
        assert_eq!(bytes.as_bytes(), &bytes);
        assert_eq!(Rc::<[u8]>::from(bytes.as_slice()).as_bytes(), &bytes);
        assert_eq!(Arc::<[u8]>::from(bytes.as_slice()).as_bytes(), &bytes);
    }
}
