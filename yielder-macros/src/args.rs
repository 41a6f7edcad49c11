use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Error, Expr, ExprLit, Lit, MetaNameValue, Token};

/// Arguments accepted by `#[yielder::test]`.
///
/// ```text
/// #[yielder::test]
/// #[yielder::test(leak_check = false)]
/// ```
pub(crate) struct TestArgs {
    /// Whether the body runs inside `yielder::testing::leak_checked`.
    pub(crate) leak_check: bool,
}

impl Default for TestArgs {
    fn default() -> Self {
        Self { leak_check: true }
    }
}

impl Parse for TestArgs {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let mut args = Self::default();

        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated(input)?;
        for pair in pairs {
            if !pair.path.is_ident("leak_check") {
                return Err(Error::new_spanned(
                    &pair.path,
                    "unknown argument, expected `leak_check`",
                ));
            }

            match &pair.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Bool(value),
                    ..
                }) => args.leak_check = value.value,
                other => {
                    return Err(Error::new_spanned(
                        other,
                        "`leak_check` expects `true` or `false`",
                    ));
                }
            }
        }

        Ok(args)
    }
}
