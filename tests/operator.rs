#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        comparison in operator is OK
        "true"
        "true"
        "false"
        "true"
    }

    tests! {
        equality in operator is OK
        "true"
        "true"
        "true"
    }

    tests! {
        mixed_kinds in operator is ERR
        "[line 1:10 in tests/target/operator/mixed_kinds.lbpl]: Unsupported binary operation."
    }

    tests! {
        bool_equality_is_unsupported in operator is ERR
        "[line 1:13 in tests/target/operator/bool_equality_is_unsupported.lbpl]: Unsupported binary operation."
    }

    tests! {
        unary_minus_on_string in operator is ERR
        "[line 1:8 in tests/target/operator/unary_minus_on_string.lbpl]: Unsupported unary operation."
    }
}
