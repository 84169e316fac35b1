pub mod molgenis_utils;
