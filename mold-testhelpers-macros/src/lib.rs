use unsynn::*;

keyword! {
    KFn = "fn";
}

unsynn! {
    struct Prelude {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    struct Signature {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct Body {
        items: BraceGroup,
    }

    struct TestFn {
        prelude: Prelude, _fn: KFn, name: Ident,
        signature: Signature, body: Body
    }
}

impl quote::ToTokens for Prelude {
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

/// Marks a test: installs the mold-testhelpers setup, makes the body return
/// `eyre::Result<()>`, and appends a final `Ok(())` so `?` works directly.
#[proc_macro_attribute]
pub fn test(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut iter = item.to_token_iter();
    let test_fn = match iter.parse::<TestFn>() {
        Ok(test_fn) => test_fn,
        Err(err) => panic!("#[test] expects a plain `fn` item: {err}"),
    };

    let TestFn {
        prelude,
        _fn,
        name,
        signature,
        body,
    } = test_fn;

    quote::quote! {
        #[::core::prelude::rust_2024::test]
        #prelude fn #name #signature -> ::mold_testhelpers::eyre::Result<()> {
            ::mold_testhelpers::setup();

            #body

            Ok(())
        }
    }
    .into()
}
