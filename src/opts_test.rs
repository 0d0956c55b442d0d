use crate::Opts;
use crate::constant::TypeMapping;
use crate::error::Error;

#[test]
fn default_opts() {
    let opts = Opts::default();
    assert_eq!(opts.max_field_size, 0);
    assert!(opts.tinyint1_is_bit());
    assert!(opts.year_is_date_type());
}

#[test]
fn parse_basic_url() {
    let opts = Opts::try_from("mysql://localhost").unwrap();
    assert_eq!(opts.max_field_size, 0);
    assert_eq!(
        opts.type_mapping,
        TypeMapping::TINYINT1_IS_BIT | TypeMapping::YEAR_IS_DATE_TYPE
    );
}

#[test]
fn parse_url_with_max_field_size() {
    let opts = Opts::try_from("mysql://localhost/db?maxFieldSize=64").unwrap();
    assert_eq!(opts.max_field_size, 64);
}

#[test]
fn parse_url_with_type_mapping() {
    let opts =
        Opts::try_from("mysql://localhost/db?tinyInt1isBit=false&yearIsDateType=0").unwrap();
    assert!(!opts.tinyint1_is_bit());
    assert!(!opts.year_is_date_type());

    let opts = Opts::try_from("mariadb://localhost/db?tinyInt1isBit=FALSE&yearIsDateType=True")
        .unwrap();
    assert!(!opts.tinyint1_is_bit());
    assert!(opts.year_is_date_type());
}

#[test]
fn unknown_parameters_are_ignored() {
    let opts = Opts::try_from("mysql://localhost/db?useSSL=true&maxFieldSize=3").unwrap();
    assert_eq!(opts.max_field_size, 3);
}

#[test]
fn invalid_scheme() {
    let result = Opts::try_from("postgres://localhost");
    assert!(matches!(result, Err(Error::BadConfigError(_))));
}

#[test]
fn invalid_url() {
    let result = Opts::try_from("not a url");
    assert!(matches!(result, Err(Error::BadConfigError(_))));
}

#[test]
fn invalid_values() {
    assert!(matches!(
        Opts::try_from("mysql://localhost?maxFieldSize=-1"),
        Err(Error::BadConfigError(_))
    ));
    assert!(matches!(
        Opts::try_from("mysql://localhost?tinyInt1isBit=maybe"),
        Err(Error::BadConfigError(_))
    ));
}
