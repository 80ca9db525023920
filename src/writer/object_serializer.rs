//! PDF object serialization.
//!
//! Converts [`Object`] values to their byte representation. Output is
//! compact and fully deterministic: dictionary keys arrive pre-sorted from
//! the `BTreeMap` model and reals are trimmed of trailing zeros.

use crate::object::Object;

/// Serializer for PDF objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a new object serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj);
        buf
    }

    /// Serialize an indirect object definition.
    ///
    /// Format: `{number} 0 obj\n{object}\nendobj\n`
    pub fn serialize_indirect(&self, number: u32, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(format!("{} 0 obj\n", number).as_bytes());
        self.write_object(&mut buf, obj);
        buf.extend_from_slice(b"\nendobj\n");
        buf
    }

    fn write_object(&self, buf: &mut Vec<u8>, obj: &Object) {
        match obj {
            Object::Integer(i) => buf.extend_from_slice(i.to_string().as_bytes()),
            Object::Real(r) => buf.extend_from_slice(fmt_number(*r).as_bytes()),
            Object::Name(n) => self.write_name(buf, n),
            Object::Array(arr) => {
                buf.push(b'[');
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        buf.push(b' ');
                    }
                    self.write_object(buf, item);
                }
                buf.push(b']');
            }
            Object::Dictionary(dict) => self.write_dictionary(buf, dict),
            Object::Stream { dict, data } => {
                let mut dict_with_length = dict.clone();
                dict_with_length
                    .insert("Length".to_string(), Object::Integer(data.len() as i64));
                self.write_dictionary(buf, &dict_with_length);
                buf.extend_from_slice(b"\nstream\n");
                buf.extend_from_slice(data);
                buf.extend_from_slice(b"\nendstream");
            }
            Object::Reference(r) => buf.extend_from_slice(r.to_string().as_bytes()),
        }
    }

    /// Names start with `/` and escape delimiter bytes as `#xx`.
    fn write_name(&self, buf: &mut Vec<u8>, name: &str) {
        buf.push(b'/');
        for byte in name.bytes() {
            match byte {
                b'!'..=b'~'
                    if !matches!(byte, b'#' | b'/' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'%') =>
                {
                    buf.push(byte);
                }
                _ => buf.extend_from_slice(format!("#{:02X}", byte).as_bytes()),
            }
        }
    }

    fn write_dictionary(&self, buf: &mut Vec<u8>, dict: &std::collections::BTreeMap<String, Object>) {
        buf.extend_from_slice(b"<<");
        for (key, value) in dict {
            buf.push(b' ');
            self.write_name(buf, key);
            buf.push(b' ');
            self.write_object(buf, value);
        }
        buf.extend_from_slice(b" >>");
    }
}

/// Format a number the way content streams and object bodies expect:
/// integers without a fraction, reals with up to five decimals and trailing
/// zeros trimmed.
pub(crate) fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.5}", value);
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{dict, name, reference};

    fn to_string(obj: &Object) -> String {
        String::from_utf8(ObjectSerializer::new().serialize(obj)).unwrap()
    }

    #[test]
    fn test_serialize_integer_and_real() {
        assert_eq!(to_string(&Object::Integer(42)), "42");
        assert_eq!(to_string(&Object::Real(1.0)), "1");
        assert_eq!(to_string(&Object::Real(157.5)), "157.5");
        assert_eq!(to_string(&Object::Real(0.42)), "0.42");
    }

    #[test]
    fn test_serialize_name() {
        assert_eq!(to_string(&name("Type")), "/Type");
        assert_eq!(to_string(&name("Times-Bold")), "/Times-Bold");
    }

    #[test]
    fn test_serialize_name_escapes_delimiters() {
        assert_eq!(to_string(&name("a b(c)")), "/a#20b#28c#29");
    }

    #[test]
    fn test_serialize_array() {
        let arr = Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(595),
            Object::Integer(842),
        ]);
        assert_eq!(to_string(&arr), "[0 0 595 842]");
    }

    #[test]
    fn test_serialize_dictionary_sorted() {
        let obj = dict(vec![
            ("Type", name("Page")),
            ("Contents", reference(4)),
            ("Parent", reference(6)),
        ]);
        assert_eq!(to_string(&obj), "<< /Contents 4 0 R /Parent 6 0 R /Type /Page >>");
    }

    #[test]
    fn test_serialize_stream_fills_length() {
        let obj = Object::Stream {
            dict: Default::default(),
            data: b"BT ET".to_vec(),
        };
        let out = to_string(&obj);
        assert!(out.starts_with("<< /Length 5 >>\nstream\nBT ET\nendstream"));
    }

    #[test]
    fn test_serialize_indirect_framing() {
        let bytes = ObjectSerializer::new().serialize_indirect(3, &Object::Integer(7));
        assert_eq!(String::from_utf8(bytes).unwrap(), "3 0 obj\n7\nendobj\n");
    }

    #[test]
    fn test_fmt_number_trims_zeros() {
        assert_eq!(fmt_number(315.0), "315");
        assert_eq!(fmt_number(157.50000), "157.5");
        assert_eq!(fmt_number(0.33333333), "0.33333");
    }
}
