/// Checks a precondition and short-circuits with the given `ErrorCode` when it
/// does not hold. Evaluates to `Ok(())`/`Err(error_code)` so callers chain it
/// with `?`. An optional trailing format string is logged alongside the error
/// location to make rejections diagnosable from the event log.
#[macro_export]
macro_rules! validate {
    ($env:expr, $assert:expr, $err:expr) => {{
        if $assert {
            Ok(())
        } else {
            let error_code: ErrorCode = $err;
            soroban_sdk::log!($env, "Error {} thrown at {}:{}", error_code, file!(), line!());
            Err(error_code)
        }
    }};
    ($env:expr, $assert:expr, $err:expr, $($arg:tt)+) => {{
        if $assert {
            Ok(())
        } else {
            let error_code: ErrorCode = $err;
            soroban_sdk::log!($env, "Error {} thrown at {}:{}", error_code, file!(), line!());
            soroban_sdk::log!($env, $($arg)*);
            Err(error_code)
        }
    }};
}

/// Reads the current value of an id counter field and advances it, wrapping
/// back to 1 on overflow so ids stay nonzero.
#[macro_export]
macro_rules! get_then_update_id {
    ($struct:expr, $property:ident) => {{
        let current_id = $struct.$property;
        $struct.$property = current_id.checked_add(1).or(Some(1)).unwrap();
        current_id
    }};
}
