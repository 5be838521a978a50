use darling::{FromDeriveInput, FromField, FromMeta, ast, util};
use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use syn::{Expr, Type};

/// Create a `syn::Error` from a spanned token.
macro_rules! span_err {
    ($t:expr, $err:expr) => {
        Err(syn::Error::new_spanned($t, $err))
    };
}

pub(crate) use span_err;

#[allow(unused)]
/// Assert that a `syn::Result` error contains the expected message.
macro_rules! assert_errors_with {
    ($e:expr, $m:expr) => {
        assert!(&$e.is_err());
        let e = $e.unwrap_err();
        assert!(
            format!("{}", e).contains($m),
            "expected error containing \"{}\" got \"{}\"",
            $m,
            e
        );
    };
}

/// Re-exported for use in tests.
#[allow(unused)]
pub(crate) use assert_errors_with;

/// Case conversion rules for rename attributes.
#[derive(Default, Debug, Copy, Clone, FromMeta)]
pub enum RenameAll {
    /// Preserve the original spelling.
    #[default]
    Verbatim,
    /// Convert to snake_case.
    SnakeCase,
    /// Convert to lowercase.
    LowerCase,
    /// Convert to UPPERCASE.
    UpperCase,
    /// Convert to SCREAMING_SNAKE_CASE.
    ScreamingSnakeCase,
    /// Convert to kebab-case.
    KebabCase,
    /// Convert to lowerCamelCase.
    CamelCase,
    /// Convert to UpperCamelCase.
    PascalCase,
}

impl RenameAll {
    /// Apply the case conversion rule to the provided string.
    pub(crate) fn rename(self, s: &str) -> String {
        match self {
            Self::Verbatim => s.to_owned(),
            Self::LowerCase => s.to_lowercase(),
            Self::SnakeCase => s.to_snake_case(),
            Self::UpperCase => s.to_uppercase(),
            Self::ScreamingSnakeCase => s.to_shouty_snake_case(),
            Self::KebabCase => s.to_kebab_case(),
            Self::CamelCase => s.to_lower_camel_case(),
            Self::PascalCase => s.to_upper_camel_case(),
        }
    }
}

/// The name of a field identifier without any raw-identifier prefix.
pub(crate) fn member_name(ident: &syn::Ident) -> String {
    ident.to_string().trim_start_matches("r#").to_owned()
}

/// Parsed inputs for `FromRow` derives.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(bindery))]
#[darling(supports(struct_named))]
pub struct RowContainer {
    /// Type identifier.
    pub ident: syn::Ident,
    /// Generic parameters.
    pub generics: syn::Generics,
    /// Parsed row data.
    pub data: ast::Data<util::Ignored, RowField>,

    /// Rename rule to apply to fields.
    #[darling(default)]
    pub rename_all: RenameAll,
}

/// Parsed attributes for a single row field.
#[derive(Debug, FromField)]
#[darling(attributes(bindery))]
pub struct RowField {
    pub ident: Option<syn::Ident>,
    pub ty: Type,

    /// Explicit column name.
    pub column: Option<String>,
    /// Use `Default::default()` when the column is missing.
    #[darling(default)]
    pub default: bool,
    /// Never read from the row.
    #[darling(default)]
    pub skip: bool,
}

/// Validate that row field attributes are compatible.
pub fn check_row_field_attrs(field: &RowField) -> syn::Result<()> {
    if field.skip {
        if field.column.is_some() {
            span_err!(&field.ty, "`skip` cannot be combined with `column`")?;
        }
        if field.default {
            span_err!(&field.ty, "`skip` cannot be combined with `default`")?;
        }
    }
    Ok(())
}

/// Parsed inputs for `ToValues` derives.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(bindery))]
#[darling(supports(struct_named))]
pub struct ValuesContainer {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub data: ast::Data<util::Ignored, ValuesField>,

    #[darling(default)]
    pub rename_all: RenameAll,
}

#[derive(Debug, FromField)]
#[darling(attributes(bindery))]
pub struct ValuesField {
    pub ident: Option<syn::Ident>,
    pub ty: Type,

    /// Explicit value name.
    pub rename: Option<String>,
    #[darling(default)]
    pub skip: bool,
}

/// A constant default, kept exactly as written. String literals stay strings.
#[derive(Debug, Clone)]
pub struct DefaultExpr(pub Expr);

impl FromMeta for DefaultExpr {
    fn from_expr(expr: &Expr) -> darling::Result<Self> {
        Ok(Self(expr.clone()))
    }
}

/// Options for one parameter binding.
#[derive(Debug, Clone, Default, FromMeta)]
pub struct ParamOptions {
    /// Parameter name, if different from the member name.
    pub alias: Option<String>,
    #[darling(default)]
    pub ignore_if_null: bool,
    /// Value to bind when the member is null.
    pub default: Option<DefaultExpr>,
}

/// A `param` entry: either the bare word or `param(...)` with options.
#[derive(Debug, Clone, Default)]
pub struct ParamSpec(pub ParamOptions);

impl FromMeta for ParamSpec {
    fn from_word() -> darling::Result<Self> {
        Ok(Self::default())
    }

    fn from_list(items: &[darling::ast::NestedMeta]) -> darling::Result<Self> {
        ParamOptions::from_list(items).map(Self)
    }
}

/// A zero-argument accessor bound on the container with `method(name = "...", ...)`.
#[derive(Debug, Clone, FromMeta)]
pub struct MethodSpec {
    pub name: syn::Ident,
    pub alias: Option<String>,
    #[darling(default)]
    pub ignore_if_null: bool,
    pub default: Option<DefaultExpr>,
}

impl MethodSpec {
    pub fn options(&self) -> ParamOptions {
        ParamOptions {
            alias: self.alias.clone(),
            ignore_if_null: self.ignore_if_null,
            default: self.default.clone(),
        }
    }
}

/// Parsed inputs for `ProcedureParameters` derives.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(bindery))]
#[darling(supports(struct_named))]
pub struct ProcedureContainer {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub data: ast::Data<util::Ignored, ProcedureField>,

    /// The stored procedure the bindings apply to.
    pub procedure: Option<String>,
    /// Accessor methods bound as members.
    #[darling(multiple)]
    pub method: Vec<MethodSpec>,
    /// Function returning the external defaults, called as `path(&self)`.
    pub defaults: Option<syn::Path>,
}

#[derive(Debug, FromField)]
#[darling(attributes(bindery))]
pub struct ProcedureField {
    pub ident: Option<syn::Ident>,
    pub ty: Type,

    #[darling(multiple)]
    pub param: Vec<ParamSpec>,
}

/// Validate container-level procedure attributes.
pub fn check_procedure_attrs(container: &ProcedureContainer) -> syn::Result<()> {
    match &container.procedure {
        None => span_err!(
            &container.ident,
            "missing #[bindery(procedure = \"...\")] attribute"
        ),
        Some(p) if p.trim().is_empty() => {
            span_err!(&container.ident, "procedure name cannot be empty")
        }
        Some(_) => Ok(()),
    }
}
