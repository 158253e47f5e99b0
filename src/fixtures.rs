#[cfg(test)]
pub mod test {
    use crate::spec::{Section, Setting, Spec};
    use crate::value::Value;

    /// A validated two-section spec covering scalar, vector, and path
    /// settings plus an environment override. Shared across module tests.
    pub fn sample_spec() -> Spec {
        let server = Section::new("server")
            .add(Setting::new(
                "host",
                "host",
                "str",
                Some(Value::from("localhost")),
                "The application host.",
            ))
            .add(
                Setting::new(
                    "port",
                    "port",
                    "int",
                    Some(Value::from("8080")),
                    "The port number.",
                )
                .with_environ("SPECFIG_PORT", "get_int"),
            )
            .add(Setting::new(
                "debug",
                "debug",
                "parse_bool",
                Some(Value::from(false)),
                "Enable debug mode.",
            ));

        let database = Section::new("database")
            .add(Setting::new(
                "url",
                "url",
                "str",
                None,
                "Connection string URL.",
            ))
            .add(Setting::new(
                "pool_size",
                "pool_size",
                "int",
                Some(Value::from(5)),
                "Connection pool size.",
            ))
            .add(Setting::new(
                "data_dir",
                "data_dir",
                "Path",
                Some(Value::from("/var/lib/app")),
                "On-disk data directory.",
            ))
            .add(Setting::new(
                "replica_weights",
                "replica_weights",
                "parse_strvec_int",
                Some(Value::from("[1, 2, 3]")),
                "Relative replica weights.",
            ));

        let mut spec = Spec::new();
        spec.add(server).unwrap();
        spec.add(database).unwrap();
        spec
    }

    #[test]
    fn sample_spec_defaults_are_typed() {
        let spec = sample_spec();
        let server = spec.section("server").unwrap();
        assert_eq!(server.get("port").unwrap().default, Some(Value::Int(8080)));
        assert_eq!(
            server.get("host").unwrap().default,
            Some(Value::Str("localhost".into()))
        );
        let database = spec.section("database").unwrap();
        assert_eq!(
            database.get("replica_weights").unwrap().default,
            Some(Value::List(vec![
                Value::Int(1),
                Value::Int(2),
                Value::Int(3)
            ]))
        );
        assert_eq!(database.get("url").unwrap().default, None);
    }
}
