#[macro_use]
mod common;

#[cfg(test)]
mod bool {
    tests! {
        literals in bool is OK
        "true"
        "false"
    }

    tests! {
        not in bool is OK
        "false"
        "true"
        "true"
        "true"
    }

    tests! {
        truthiness in bool is OK
        "yes"
        "not truthy"
        "also not"
    }
}
