//! Declarative description of every import parameter.
//!
//! The table is what a presentation layer renders as a form and what the
//! structured resolver checks for presence. It carries no behaviour.

pub const DATA_MODEL_NAME_SUFFIX: &str = "data_model_name_suffix";
pub const DATABASE_HOST: &str = "database_host";
pub const DATABASE_PORT: &str = "database_port";
pub const DATABASE_SSL: &str = "database_ssl";
pub const DATABASE_USERNAME: &str = "database_username";
pub const DATABASE_PASSWORD: &str = "database_password";
pub const DATABASE_NAMES: &str = "database_names";

const GROUP_DATA_MODEL: &str = "DataModel";
const GROUP_CONNECTION: &str = "Database Connection Details";
const GROUP_IMPORT: &str = "Database Import Details";

/// One declared configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterField {
    pub key: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub group: &'static str,
    pub group_order: u32,
    pub order: u32,
    pub optional: bool,
    /// Value must never be logged or echoed back.
    pub sensitive: bool,
}

impl ParameterField {
    pub fn is_required(&self) -> bool {
        !self.optional
    }

    fn sort_key(&self) -> (u32, u32) {
        (self.group_order, self.order)
    }
}

pub static PARAMETER_SCHEMA: &[ParameterField] = &[
    ParameterField {
        key: DATA_MODEL_NAME_SUFFIX,
        display_name: "DataModel name suffix",
        description: "A suffix to attach to the end of the auto-imported DataModel name. \
                      Only used when no DataModel name is supplied; the name becomes {modelName}_{suffix}.",
        group: GROUP_DATA_MODEL,
        group_order: 0,
        order: 0,
        optional: true,
        sensitive: false,
    },
    ParameterField {
        key: DATABASE_HOST,
        display_name: "Database Host",
        description: "The hostname of the server that is running the database",
        group: GROUP_CONNECTION,
        group_order: 1,
        order: 0,
        optional: false,
        sensitive: false,
    },
    ParameterField {
        key: DATABASE_PORT,
        display_name: "Database Port",
        description: "The port that the database is accessed through. \
                      If not supplied then the default port for the specified type will be used.",
        group: GROUP_CONNECTION,
        group_order: 1,
        order: 1,
        optional: true,
        sensitive: false,
    },
    ParameterField {
        key: DATABASE_SSL,
        display_name: "SSL",
        description: "Whether SSL should be used to connect to the database.",
        group: GROUP_CONNECTION,
        group_order: 1,
        order: 2,
        optional: true,
        sensitive: false,
    },
    ParameterField {
        key: DATABASE_USERNAME,
        display_name: "Username",
        description: "The username used to connect to the database.",
        group: GROUP_CONNECTION,
        group_order: 1,
        order: 3,
        optional: false,
        sensitive: false,
    },
    ParameterField {
        key: DATABASE_PASSWORD,
        display_name: "Password",
        description: "The password used to connect to the database.",
        group: GROUP_CONNECTION,
        group_order: 1,
        order: 4,
        optional: false,
        sensitive: true,
    },
    ParameterField {
        key: DATABASE_NAMES,
        display_name: "Database Name/s",
        description: "A comma separated list of names of the databases to connect to. \
                      The database name is used as the DataModel name unless a DataModel name is supplied. \
                      If multiple names are supplied the DataModel name is ignored and the same username \
                      and password are used for every named database.",
        group: GROUP_IMPORT,
        group_order: 2,
        order: 0,
        optional: false,
        sensitive: false,
    },
];

/// Look up a field by key
pub fn field(key: &str) -> Option<&'static ParameterField> {
    PARAMETER_SCHEMA.iter().find(|f| f.key == key)
}

/// All fields sorted by group order, then field order within the group.
pub fn presentation_order() -> Vec<&'static ParameterField> {
    let mut fields: Vec<&'static ParameterField> = PARAMETER_SCHEMA.iter().collect();
    fields.sort_by_key(|f| f.sort_key());
    fields
}

/// Non-optional fields in presentation order.
pub fn required_fields() -> Vec<&'static ParameterField> {
    presentation_order()
        .into_iter()
        .filter(|f| f.is_required())
        .collect()
}

/// Distinct groups with their order, lowest first.
pub fn groups() -> Vec<(&'static str, u32)> {
    let mut groups: Vec<(&'static str, u32)> = Vec::new();
    for f in presentation_order() {
        if !groups.iter().any(|(name, _)| *name == f.group) {
            groups.push((f.group, f.group_order));
        }
    }
    groups
}
