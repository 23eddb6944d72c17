//! `#[test]` for the wither crates: the body may use `?`, and the shared test
//! setup (logger, error hooks) runs before it.

use unsynn::*;

// `Preamble` is everything before `fn` (attributes, qualifiers), `Signature`
// everything between the name and the body.
keyword! {
    KFn = "fn";
}

unsynn! {
    struct Preamble {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    struct Signature {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct Body {
        items: BraceGroup,
    }

    struct TestFn {
        preamble: Preamble, _fn: KFn, name: Ident,
        signature: Signature, body: Body
    }
}

impl quote::ToTokens for Preamble {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Signature {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Body {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        tokens.extend(self.items.0.stream())
    }
}

fn expand(test_fn: TestFn) -> TokenStream {
    let TestFn {
        preamble,
        _fn,
        name,
        signature,
        body,
    } = test_fn;

    quote::quote! {
        #[::core::prelude::rust_2024::test]
        #preamble fn #name #signature -> ::wither_testhelpers::eyre::Result<()> {
            ::wither_testhelpers::setup();

            #body

            Ok(())
        }
    }
}

/// Marks a test whose body may return early with `?`.
#[proc_macro_attribute]
pub fn test(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut tokens = item.to_token_iter();
    match tokens.parse::<TestFn>() {
        Ok(test_fn) => expand(test_fn).into(),
        Err(err) => {
            let message = format!("#[wither_testhelpers::test] expects a function: {err:?}");
            quote::quote! { ::core::compile_error!(#message); }.into()
        }
    }
}
