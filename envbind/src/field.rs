//! Field descriptor table for struct destinations

use std::fmt;

/// A struct whose fields can be bound from environment variables.
///
/// Usually implemented by `#[derive(Bind)]`. A hand-written implementation
/// lists one [`Field`] per struct field, in declared order:
///
/// ```rust
/// use envbind::{Destination, Error, Field, Fields, Resolved, Slot};
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Fields for Server {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![
///             Field::new("host", "HOST", Slot::Str(&mut self.host)),
///             Field::new("port", "PORT,omitempty", Slot::U16(&mut self.port)),
///         ]
///     }
/// }
///
/// impl Destination for Server {
///     fn resolve(&mut self) -> Result<Resolved<'_>, Error> {
///         Ok(Resolved::Struct(self))
///     }
/// }
///
/// # fn main() -> Result<(), Error> {
/// let env: std::collections::HashMap<String, String> =
///     [("HOST".to_string(), "localhost".to_string())].into();
/// let mut server = Server::default();
/// envbind::bind_with(&mut server, &env)?;
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 0);
/// # Ok(())
/// # }
/// ```
pub trait Fields {
    /// Borrow every field of the struct, in declared order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// One struct field: its name, annotation and a typed borrow of its storage.
#[derive(Debug)]
pub struct Field<'a> {
    name: &'static str,
    tag: &'static str,
    settable: bool,
    slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// Describe a public field.
    pub fn new(name: &'static str, tag: &'static str, slot: Slot<'a>) -> Self {
        Self {
            name,
            tag,
            settable: true,
            slot,
        }
    }

    /// Describe a private field. The binder skips it without reading the
    /// environment.
    pub fn unexported(name: &'static str, tag: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            tag,
            settable: false,
            slot: Slot::Unsupported(type_name),
        }
    }

    /// Declared field identifier.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Raw annotation text, empty when the field has none.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn is_settable(&self) -> bool {
        self.settable
    }

    pub fn kind(&self) -> Kind {
        self.slot.kind()
    }

    pub(crate) fn into_slot(self) -> Slot<'a> {
        self.slot
    }
}

/// Mutable borrow of a field, tagged with its type.
#[derive(Debug)]
pub enum Slot<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Str(&'a mut String),
    /// A field of a type the binder cannot assign, carrying its type name.
    Unsupported(&'static str),
}

impl Slot<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Slot::I8(_) => Kind::Int(8),
            Slot::I16(_) => Kind::Int(16),
            Slot::I32(_) => Kind::Int(32),
            Slot::I64(_) => Kind::Int(64),
            Slot::Isize(_) => Kind::Int(isize::BITS),
            Slot::U8(_) => Kind::Uint(8),
            Slot::U16(_) => Kind::Uint(16),
            Slot::U32(_) => Kind::Uint(32),
            Slot::U64(_) => Kind::Uint(64),
            Slot::Usize(_) => Kind::Uint(usize::BITS),
            Slot::F32(_) => Kind::Float(32),
            Slot::F64(_) => Kind::Float(64),
            Slot::Str(_) => Kind::String,
            Slot::Unsupported(_) => Kind::Unsupported,
        }
    }

    /// Name of the borrowed field's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Slot::I8(_) => "i8",
            Slot::I16(_) => "i16",
            Slot::I32(_) => "i32",
            Slot::I64(_) => "i64",
            Slot::Isize(_) => "isize",
            Slot::U8(_) => "u8",
            Slot::U16(_) => "u16",
            Slot::U32(_) => "u32",
            Slot::U64(_) => "u64",
            Slot::Usize(_) => "usize",
            Slot::F32(_) => "f32",
            Slot::F64(_) => "f64",
            Slot::Str(_) => std::any::type_name::<String>(),
            Slot::Unsupported(type_name) => *type_name,
        }
    }
}

/// Value category of a field, with the bit width for numeric kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Int(u32),
    Uint(u32),
    Float(u32),
    String,
    Unsupported,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Int(bits) => write!(f, "int{bits}"),
            Kind::Uint(bits) => write!(f, "uint{bits}"),
            Kind::Float(bits) => write!(f, "float{bits}"),
            Kind::String => f.write_str("string"),
            Kind::Unsupported => f.write_str("unsupported"),
        }
    }
}
