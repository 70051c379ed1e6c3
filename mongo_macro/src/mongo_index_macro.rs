use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Attribute, DeriveInput, LitStr, Token};

struct IndexDef {
    fields: Vec<String>,
    unique: bool,
    order: i32,
    name: Option<String>,
}

pub fn expand_index_model_provider(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    match build_provider(&ast) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn build_provider(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;
    let mut index_exprs = vec![];

    for attr in ast.attrs.iter().filter(|a| a.path().is_ident("mongo_index")) {
        let def = parse_index(attr)?;
        index_exprs.push(index_model(&def));
    }

    Ok(quote! {
        impl ::common::repository::index_trait::MongoIndexModelProvider for #name {
            fn index_models() -> Vec<::mongodb::IndexModel> {
                vec![
                    #(#index_exprs),*
                ]
            }
        }
    })
}

/// 解析 `#[mongo_index(fields("a", "b"), unique, order("desc"), name("idx"))]`
fn parse_index(attr: &Attribute) -> syn::Result<IndexDef> {
    let mut def = IndexDef { fields: vec![], unique: false, order: 1, name: None };

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("fields") {
            let content;
            syn::parenthesized!(content in meta.input);
            let lits = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
            def.fields.extend(lits.iter().map(LitStr::value));
            Ok(())
        } else if meta.path.is_ident("unique") {
            def.unique = true;
            Ok(())
        } else if meta.path.is_ident("order") {
            let content;
            syn::parenthesized!(content in meta.input);
            let lit: LitStr = content.parse()?;
            if lit.value().eq_ignore_ascii_case("desc") {
                def.order = -1;
            }
            Ok(())
        } else if meta.path.is_ident("name") {
            let content;
            syn::parenthesized!(content in meta.input);
            let lit: LitStr = content.parse()?;
            def.name = Some(lit.value());
            Ok(())
        } else {
            Err(meta.error("unsupported #[mongo_index(...)] attribute"))
        }
    })?;

    if def.fields.is_empty() {
        return Err(syn::Error::new_spanned(attr, "#[mongo_index(...)] requires fields(...)"));
    }
    Ok(def)
}

fn index_model(def: &IndexDef) -> TokenStream {
    let order = def.order;
    let key_inserts = def.fields.iter().map(|field| {
        quote! { keys.insert(#field, #order); }
    });
    let unique = def.unique;
    let name = match &def.name {
        Some(n) => quote! { Some(#n.to_string()) },
        None => quote! { None::<String> },
    };

    quote! {
        {
            let mut keys = ::mongodb::bson::Document::new();
            #(#key_inserts)*
            let options = ::mongodb::options::IndexOptions::builder()
                .unique(Some(#unique))
                .name(#name)
                .build();
            ::mongodb::IndexModel::builder().keys(keys).options(Some(options)).build()
        }
    }
}
