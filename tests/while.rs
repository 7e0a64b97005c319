#[macro_use]
mod common;

#[cfg(test)]
mod _while {
    tests! {
        countdown in while is OK
        "3"
        "2"
        "1"
    }

    tests! {
        false_condition_skips_body in while is OK
        "done"
    }

    tests! {
        return_inside in while is OK
        "3"
    }

    tests! {
        loop_breaks in while is OK
        "0"
        "1"
    }

    tests! {
        loop_with_continue in while is OK
        "2"
    }
}
