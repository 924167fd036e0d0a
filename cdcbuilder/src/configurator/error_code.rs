//! Error classifications reported by the configurator library.
//!
//! These are the `ConfiguratorError` values carried in the `ocfmRetCode`
//! returned by the project and import/export entry points. The numeric values
//! are part of the library's ABI: they are appended to, never reordered.

macro_rules! error_codes {
    ($($variant:ident = $raw:literal => $name:literal,)+) => {
        /// Classification carried by every [`LibraryResult`](super::LibraryResult).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(i32)]
        pub enum ErrorCode {
            $($variant = $raw,)+
        }

        impl ErrorCode {
            /// Every classification in ABI order.
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$variant,)+];

            /// Map a raw value returned across the library boundary.
            pub fn from_raw(raw: i32) -> Option<Self> {
                match raw {
                    $($raw => Some(ErrorCode::$variant),)+
                    _ => None,
                }
            }

            /// The library's own identifier for this classification.
            pub fn name(self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $name,)+
                }
            }
        }
    };
}

error_codes! {
    Success = 0 => "OCFM_ERR_SUCCESS",
    FileNotPresent = 1 => "OCFM_ERR_FILE_NOT_PRESENT",
    FileCannotOpen = 2 => "OCFM_ERR_FILE_CANNOT_OPEN",
    InvalidNodeId = 3 => "OCFM_ERR_INVALID_NODEID",
    InvalidNodePos = 4 => "OCFM_ERR_INVALID_NODEPOS",
    InvalidNodeType = 5 => "OCFM_ERR_INVALID_NODETYPE",
    InvalidIndexId = 6 => "OCFM_ERR_INVALID_INDEXID",
    InvalidIndexPos = 7 => "OCFM_ERR_INVALID_INDEXPOS",
    InvalidSubIndexId = 8 => "OCFM_ERR_INVALID_SUBINDEXID",
    InvalidSubIndexPos = 9 => "OCFM_ERR_INVALID_SUBINDEXPOS",
    InvalidAttributeType = 10 => "OCFM_ERR_INVALID_ATTRIBUTETYPE",
    NoNodesFound = 11 => "OCFM_ERR_NO_NODES_FOUND",
    NoIndexFound = 12 => "OCFM_ERR_NO_INDEX_FOUND",
    NoSubIndexesFound = 13 => "OCFM_ERR_NO_SUBINDEXS_FOUND",
    NodeIdNotFound = 14 => "OCFM_ERR_NODEID_NOT_FOUND",
    IndexIdNotFound = 15 => "OCFM_ERR_INDEXID_NOT_FOUND",
    SubIndexIdNotFound = 16 => "OCFM_ERR_SUBINDEXID_NOT_FOUND",
    NodeAlreadyExists = 17 => "OCFM_ERR_NODE_ALREADY_EXISTS",
    IndexAlreadyExists = 18 => "OCFM_ERR_INDEX_ALREADY_EXISTS",
    SubIndexAlreadyExists = 19 => "OCFM_ERR_SUBINDEX_ALREADY_EXISTS",
    InvalidValue = 20 => "OCFM_ERR_INVALID_VALUE",
    InvalidName = 21 => "OCFM_ERR_INVALID_NAME",
    XmlFileCorrupted = 22 => "OCFM_ERR_XML_FILE_CORRUPTED",
    CannotOpenFile = 23 => "OCFM_ERR_CANNOT_OPEN_FILE",
    ParseXml = 24 => "OCFM_ERR_PARSE_XML",
    ModuleIndexNotFound = 25 => "OCFM_ERR_MODULE_INDEX_NOT_FOUND",
    ModuleSubIndexNotFound = 26 => "OCFM_ERR_MODULE_SUBINDEX_NOT_FOUND",
    UniqueIdRefNotFound = 27 => "OCFM_ERR_UNIQUE_ID_REF_NOT_FOUND",
    StructDataTypeNotFound = 28 => "OCFM_ERR_STRUCT_DATATYPE_NOT_FOUND",
    NoCnNodesFound = 29 => "OCFM_ERR_NO_CN_NODES_FOUND",
    DataTypeNotFound = 30 => "OCFM_ERR_DATATYPE_NOT_FOUND",
    ValueNotWithinRange = 31 => "OCFM_ERR_VALUE_NOT_WITHIN_RANGE",
    MnNodeDoesntExist = 32 => "OCFM_ERR_MN_NODE_DOESNT_EXIST",
    CreateXmlWriterFailed = 33 => "OCFM_ERR_CREATE_XML_WRITER_FAILED",
    XmlWriterStartEltFailed = 34 => "OCFM_ERR_XML_WRITER_START_ELT_FAILED",
    XmlWriterEndEltFailed = 35 => "OCFM_ERR_XML_WRITER_END_ELT_FAILED",
    XmlStartDocFailed = 36 => "OCFM_ERR_XML_START_DOC_FAILED",
    XmlEndDocFailed = 37 => "OCFM_ERR_XML_END_DOC_FAILED",
    CannotOpenProjectVerMismatch = 38 => "OCFM_ERR_CANNOT_OPEN_PROJECT_VER_MISMATCH",
    InvalidPjtXml = 39 => "OCFM_ERR_INVALID_PJTXML",
    ProjectSettings = 40 => "OCFM_ERR_PROJECT_SETTINGS",
    InvalidDataTypeForPdo = 41 => "OCFM_ERR_INVALID_DATATYPE_FOR_PDO",
    XapFileNotWritten = 42 => "OCFM_ERR_XAP_FILE_NOT_WRITTEN",
    MaxPiSize = 43 => "OCFM_ERR_MAX_PI_SIZE",
    Unknown = 44 => "OCFM_ERR_UNKNOWN",
    MultiplexAssignError = 45 => "OCFM_ERR_MULTIPLEX_ASSIGN_ERROR",
    InvalidUpperLowerLimits = 46 => "OCFM_ERR_INVALID_UPPERLOWER_LIMITS",
    LowCnPresTimeout = 47 => "OCFM_ERR_LOW_CNPRESTIMEOUT",
    CnExceedsCrossTrafficStn = 48 => "OCFM_ERR_CN_EXCEEDS_CROSS_TRAFFIC_STN",
    ExcessChannel = 49 => "OCFM_ERR_EXCESS_CHANNEL",
    InvalidTxtForCdc = 50 => "OCFM_ERR_INVALID_TXT_FOR_CDC",
    MemoryAllocationError = 51 => "OCFM_ERR_MEMORY_ALLOCATION_ERROR",
    ExceedsMaxTpdoChannels = 52 => "OCFM_ERR_EXCEEDS_MAX_TPDO_CHANNELS",
    NumberOfEntriesSubIndexNotFound = 53 => "OCFM_ERR_NUMBER_OF_ENTRIES_SUBINDEX_NOT_FOUND",
    InvalidParameter = 54 => "OCFM_ERR_INVALID_PARAMETER",
    InvalidSizeMapped = 55 => "OCFM_ERR_INVALID_SIZE_MAPPED",
    InvalidMappingTypeForPdo = 56 => "OCFM_ERR_INVALID_MAPPING_TYPE_FOR_PDO",
    InvalidAccessTypeForPdo = 57 => "OCFM_ERR_INVALID_ACCESS_TYPE_FOR_PDO",
    InvalidPdoOffset = 58 => "OCFM_ERR_INVALID_PDO_OFFSET",
    CompatibilityInfoPre130PdoMapping = 59 => "COMPATIBILITY_INFO_PRE_130_PDOMAPPING",
    SchemaValidationFailed = 60 => "OCFM_ERR_SCHEMA_VALIDATION_FAILED",
    XddSchemaNotFound = 61 => "OCFM_ERR_XDD_SCHEMA_NOT_FOUND",
    XddSchemaNotValid = 62 => "OCFM_ERR_XDD_SCHEMA_NOT_VALID",
    XddSchemaParserContextError = 63 => "OCFM_ERR_XDD_SCHEMA_PARSER_CONTEXT_ERROR",
    XddSchemaValidationContextError = 64 => "OCFM_ERR_XDD_SCHEMA_VALIDATION_CONTEXT_ERROR",
    XmlParsingError = 65 => "OCFM_ERR_XML_PARSING_ERROR",
    CannotCreateDir = 66 => "OCFM_ERR_CANNOT_CREATE_DIR",
    NoProjectLoaded = 67 => "OCFM_ERR_NO_PROJECT_LOADED",
    ChainedAndMultiplexed = 68 => "OCFM_ERR_CHAINED_AND_MULTIPLEXED",
    InsufficientMappingObjects = 69 => "OCFM_ERR_INSUFFICIENT_MAPPING_OBJECTS",
    ChannelPayloadLimitExceeded = 70 => "OCFM_ERR_CHANNEL_PAYLOAD_LIMIT_EXCEEDED",
    ChannelObjectLimitExceeded = 71 => "OCFM_ERR_CHANNEL_OBJECT_LIMIT_EXCEEDED",
    MultiplexingNotSupported = 72 => "OCFM_ERR_MULTIPLEXING_NOT_SUPPORTED",
    InvalidAccessTypeForParameter = 73 => "OCFM_ERR_INVALID_ACCESS_TYPE_FOR_PARAMETER",
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
