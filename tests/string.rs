#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        literal in string is OK
        "hello"
    }

    tests! {
        concatenation in string is OK
        "foobar"
    }

    tests! {
        concat_with_int in string is OK
        "n = 42"
        "1!"
    }

    tests! {
        concat_with_float in string is OK
        "pi is 3.5"
    }

    tests! {
        escapes in string is OK
        "a\tb"
        "line1"
        "line2"
        "say \"hi\""
    }

    tests! {
        unterminated in string is ERR
        "[line 1:8 in tests/target/string/unterminated.lbpl]: Unterminated string."
    }

    tests! {
        invalid_escape in string is ERR
        "[line 1:8 in tests/target/string/invalid_escape.lbpl]: Invalid escape sequence."
    }
}
