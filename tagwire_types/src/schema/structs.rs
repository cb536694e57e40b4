use crate::error::SchemaError;
use crate::schema::{StructRef, Type};
use crate::value::Value;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StructKind {
    Struct,
    /// Same shape as a struct; instances are meant to be raised as errors.
    Exception,
}

/// Produces a field's default value, whenever an instance is built without one.
#[derive(Clone)]
pub struct DefaultFactory(Arc<dyn Fn() -> Value + Send + Sync>);
impl DefaultFactory {
    pub fn new(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
    pub fn produce(&self) -> Value {
        (self.0)()
    }
}
impl fmt::Debug for DefaultFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultFactory(..)")
    }
}

#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    ty: Type,
    tag: u16,
    default: Option<DefaultFactory>,
    optional: bool,
}

impl Field {
    /// A required field, defaulting to the zero value of `ty`.
    pub fn new(name: impl Into<String>, ty: Type, tag: u16) -> Self {
        Self {
            name: name.into(),
            ty,
            tag,
            default: None,
            optional: false,
        }
    }

    pub fn with_default(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(DefaultFactory::new(f));
        self
    }

    /// Informational only. Neither codec distinguishes an absent field from a default one.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn ty(&self) -> &Type {
        &self.ty
    }
    pub fn tag(&self) -> u16 {
        self.tag
    }
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn default_value(&self) -> Result<Value, SchemaError> {
        match &self.default {
            Some(factory) => Ok(factory.produce()),
            None => self.ty.zero_value(),
        }
    }
}

/// A named, tagged record shape.
///
/// Fields are kept in ascending tag order, which is also the order both codecs
/// write them in.
pub struct StructType {
    name: String,
    kind: StructKind,
    fields: Vec<Field>,
}

impl StructType {
    pub fn builder(name: impl Into<String>) -> StructBuilder {
        StructBuilder::new(name.into(), StructKind::Struct)
    }
    pub fn exception_builder(name: impl Into<String>) -> StructBuilder {
        StructBuilder::new(name.into(), StructKind::Exception)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> StructKind {
        self.kind
    }
    pub fn is_exception(&self) -> bool {
        self.kind == StructKind::Exception
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn fields_by_name(&self) -> BTreeMap<&str, &Field> {
        self.fields.iter().map(|f| (f.name(), f)).collect()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.field_index(name).map(|idx| &self.fields[idx])
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field_by_tag(&self, tag: u16) -> Option<(usize, &Field)> {
        let idx = self.fields.binary_search_by_key(&tag, |f| f.tag).ok()?;
        Some((idx, &self.fields[idx]))
    }
}

impl fmt::Debug for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kw = match self.kind {
            StructKind::Struct => "struct",
            StructKind::Exception => "exception",
        };
        let fields = self
            .fields
            .iter()
            .format_with(", ", |fld, cb| cb(&format_args!("{}: {} {}", fld.tag, fld.ty, fld.name)));
        write!(f, "{kw} {} {{ {fields} }}", self.name)
    }
}

pub struct StructBuilder {
    name: String,
    kind: StructKind,
    fields: Vec<Field>,
}

impl StructBuilder {
    fn new(name: String, kind: StructKind) -> Self {
        Self {
            name,
            kind,
            fields: vec![],
        }
    }

    pub fn field(self, name: impl Into<String>, ty: Type, tag: u16) -> Result<Self, SchemaError> {
        self.with_field(Field::new(name, ty, tag))
    }

    pub fn with_field(mut self, field: Field) -> Result<Self, SchemaError> {
        self.add_field(field)?;
        Ok(self)
    }

    /// Registers a field. Fails on a zero tag, a tag or name already in use,
    /// a type that carries no values, or a direct self-embedding.
    pub fn add_field(&mut self, field: Field) -> Result<(), SchemaError> {
        if field.tag == 0 {
            return Err(SchemaError::InvalidTag {
                struct_name: self.name.clone(),
                field: field.name,
                tag: field.tag,
            });
        }
        if self.fields.iter().any(|f| f.name == field.name) {
            return Err(SchemaError::DuplicateName {
                struct_name: self.name.clone(),
                field: field.name,
            });
        }
        if !field.ty.is_value_type() {
            return Err(SchemaError::NotAValueType {
                struct_name: self.name.clone(),
                type_name: field.ty.to_string(),
                field: field.name,
            });
        }
        if matches!(&field.ty, Type::Struct(sref) if sref.is_cyclic()) {
            return Err(SchemaError::DirectSelfReference {
                struct_name: self.name.clone(),
                field: field.name,
            });
        }

        match self.fields.binary_search_by_key(&field.tag, |f| f.tag) {
            Ok(idx) => Err(SchemaError::DuplicateTag {
                struct_name: self.name.clone(),
                field: field.name,
                tag: field.tag,
                existing: self.fields[idx].name.clone(),
            }),
            Err(idx) => {
                self.fields.insert(idx, field);
                Ok(())
            }
        }
    }

    pub fn build(self) -> Arc<StructType> {
        Arc::new(self.into_struct_type())
    }

    /// Builds a struct whose fields may refer to the struct itself.
    ///
    /// `define` receives the self-referring [`Type`] along with this builder.
    /// The self reference has to sit inside a container, e.g. `list<Tree>`.
    pub fn build_recursive<F>(self, define: F) -> Result<Arc<StructType>, SchemaError>
    where
        F: FnOnce(Type, StructBuilder) -> Result<StructBuilder, SchemaError>,
    {
        let name: Arc<str> = Arc::from(self.name.as_str());
        let mut failure = None;
        let schema = Arc::new_cyclic(|this| {
            let self_ty = Type::Struct(StructRef::cyclic(Arc::clone(&name), this.clone()));
            let (fallback_name, kind) = (self.name.clone(), self.kind);
            match define(self_ty, self) {
                Ok(builder) => builder.into_struct_type(),
                Err(e) => {
                    failure = Some(e);
                    StructType {
                        name: fallback_name,
                        kind,
                        fields: vec![],
                    }
                }
            }
        });
        match failure {
            Some(e) => Err(e),
            None => Ok(schema),
        }
    }

    fn into_struct_type(self) -> StructType {
        StructType {
            name: self.name,
            kind: self.kind,
            fields: self.fields,
        }
    }
}
