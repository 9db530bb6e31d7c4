macro_rules! model_use {
    () => {
        #[allow(unused_imports)]
        use failure::Error;
        #[allow(unused_imports)]
        use fuel_api::FuelError;
        #[allow(unused_imports)]
        use serde_json::Value;
        #[allow(unused_imports)]
        use std::collections::BTreeMap;
        #[allow(unused_imports)]
        use std::convert::TryFrom;
        #[allow(unused_imports)]
        use std::io::Read;
        #[allow(unused_imports)]
        use std::str::FromStr;
    };
}

/// Parsing entry points for models read from Fuel output. Shape errors are
/// reported as `FuelError::MalformedRecord` carrying the serde diagnostic.
macro_rules! model_impl {
    ($model:ident) => {
        impl $model {
            pub fn from_json<R>(r: R) -> Result<$model, Error>
            where
                R: Read,
            {
                serde_json::from_reader(r)
                    .map_err(|e| FuelError::MalformedRecord(e.to_string()).into())
            }
        }

        impl FromStr for $model {
            type Err = Error;

            fn from_str(s: &str) -> Result<$model, Error> {
                serde_json::from_str(s)
                    .map_err(|e| FuelError::MalformedRecord(e.to_string()).into())
            }
        }

        impl TryFrom<Value> for $model {
            type Error = Error;

            fn try_from(val: Value) -> Result<$model, Error> {
                serde_json::from_value(val)
                    .map_err(|e| FuelError::MalformedRecord(e.to_string()).into())
            }
        }
    };
}
