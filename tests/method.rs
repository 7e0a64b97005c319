#[macro_use]
mod common;

#[cfg(test)]
mod method {
    tests! {
        bound_method_keeps_receiver in method is OK
        "ada"
    }

    tests! {
        methods_see_fields in method is OK
        "9"
    }

    tests! {
        field_shadows_method in method is OK
        "method"
        "field"
    }
}
