#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        precedence in number is OK
        "7"
    }

    tests! {
        grouping in number is OK
        "9"
    }

    tests! {
        integer_division in number is OK
        "3"
    }

    tests! {
        modulo in number is OK
        "1"
    }

    tests! {
        float_arithmetic in number is OK
        "3.75"
    }

    tests! {
        negative in number is OK
        "-2"
    }

    tests! {
        divide_by_zero in number is ERR
        "[line 1:10 in tests/target/number/divide_by_zero.lbpl]: Division by zero."
    }

    tests! {
        modulo_by_zero in number is ERR
        "[line 1:10 in tests/target/number/modulo_by_zero.lbpl]: Modulo by zero."
    }
}
