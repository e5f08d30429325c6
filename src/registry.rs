//! Keyed dispatch from `(user id, record id)` to record parsers.

use crate::vlr::{
    ClassificationLookup, ExtraBytes, GeoKeyDirectory, LASF_PROJECTION, LASF_SPEC, RawVlr, Record,
    WaveformPacketDescriptor, record_id, text_from_bytes,
};
use crate::{Error, Result, vlr::geokey};
use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

/// A function that parses a raw VLR's payload into a record.
///
/// Factories are stateless; the registry never retains parsed records.
pub type RecordFactory = fn(&RawVlr) -> Result<Record>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Key {
    user_id: Option<String>,
    record_id: u16,
}

static DEFAULT: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Returns the process-wide default registry.
pub(crate) fn default() -> &'static Registry {
    &DEFAULT
}

/// A thread-safe map from `(user id, record id)` to record parsers.
///
/// Registrations come in two styles: user-id-specific, used for every record
/// type the LAS specification defines, and user-id-agnostic wildcards on the
/// record id alone, used for the waveform packet descriptor range. Lookup
/// prefers an exact `(user id, record id)` match, then a record id wildcard,
/// and otherwise degrades to [Record::Unknown], so unrecognized vendor
/// extensions never abort a read.
///
/// One process-wide default instance backs [Vlr::new](crate::Vlr::new);
/// independent instances can be constructed for isolation:
///
/// ```
/// use las_codec::Registry;
/// use las_codec::vlr::Record;
///
/// let registry = Registry::new();
/// registry.register(Some("MyCompany"), 42, |raw| {
///     Ok(Record::Unknown(raw.data.clone()))
/// });
/// ```
#[derive(Debug)]
pub struct Registry {
    factories: RwLock<HashMap<Key, RecordFactory>>,
}

impl Registry {
    /// Creates a registry preloaded with the record types the LAS
    /// specification defines.
    pub fn new() -> Registry {
        let registry = Registry::empty();
        registry.register(Some(LASF_PROJECTION), record_id::GEO_KEY_DIRECTORY, |raw| {
            GeoKeyDirectory::from_bytes(&raw.data).map(Record::GeoKeyDirectory)
        });
        registry.register(Some(LASF_PROJECTION), record_id::GEO_DOUBLE_PARAMS, |raw| {
            geokey::double_params_from_bytes(&raw.data).map(Record::GeoDoubleParams)
        });
        registry.register(Some(LASF_PROJECTION), record_id::GEO_ASCII_PARAMS, |raw| {
            geokey::ascii_params_from_bytes(&raw.data).map(Record::GeoAsciiParams)
        });
        registry.register(
            Some(LASF_PROJECTION),
            record_id::OGC_MATH_TRANSFORM_WKT,
            |raw| text_from_bytes(&raw.data).map(Record::OgcMathTransformWkt),
        );
        registry.register(
            Some(LASF_PROJECTION),
            record_id::OGC_COORDINATE_SYSTEM_WKT,
            |raw| text_from_bytes(&raw.data).map(Record::OgcCoordinateSystemWkt),
        );
        registry.register(Some(LASF_SPEC), record_id::CLASSIFICATION_LOOKUP, |raw| {
            ClassificationLookup::from_bytes(&raw.data).map(Record::ClassificationLookup)
        });
        registry.register(Some(LASF_SPEC), record_id::TEXT_AREA_DESCRIPTION, |raw| {
            text_from_bytes(&raw.data).map(Record::TextAreaDescription)
        });
        registry.register(Some(LASF_SPEC), record_id::EXTRA_BYTES, |raw| {
            ExtraBytes::from_bytes(&raw.data).map(Record::ExtraBytes)
        });
        registry.register(Some(LASF_SPEC), record_id::SUPERSEDED, |_| {
            Ok(Record::Superseded)
        });
        registry.register(Some(LASF_SPEC), record_id::WAVEFORM_DATA_PACKETS, |raw| {
            Ok(Record::WaveformDataPackets(raw.data.clone()))
        });
        for record_id in record_id::FIRST_WAVEFORM_PACKET_DESCRIPTOR
            ..=record_id::LAST_WAVEFORM_PACKET_DESCRIPTOR
        {
            registry.register(None, record_id, |raw| {
                WaveformPacketDescriptor::from_bytes(&raw.data)
                    .map(Record::WaveformPacketDescriptor)
            });
        }
        registry
    }

    /// Creates a registry with no registrations at all.
    ///
    /// Every lookup degrades to [Record::Unknown].
    pub fn empty() -> Registry {
        Registry {
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a factory, replacing any existing registration.
    ///
    /// Pass `None` as the user id to register a wildcard on the record id
    /// alone; exact registrations take precedence over wildcards.
    pub fn register(&self, user_id: Option<&str>, record_id: u16, factory: RecordFactory) {
        let key = Key {
            user_id: user_id.map(String::from),
            record_id,
        };
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(|err| err.into_inner());
        if factories.insert(key, factory).is_some() {
            log::warn!(
                "replaced record factory for user_id={:?}, record_id={}",
                user_id,
                record_id
            );
        }
    }

    /// Registers a factory, failing if one is already registered for the key.
    ///
    /// On failure the existing registration is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Registry;
    /// use las_codec::vlr::Record;
    ///
    /// let registry = Registry::empty();
    /// let factory = |_: &_| Ok(Record::Superseded);
    /// assert!(registry.try_register(Some("MyCompany"), 42, factory).is_ok());
    /// assert!(registry.try_register(Some("MyCompany"), 42, factory).is_err());
    /// ```
    pub fn try_register(
        &self,
        user_id: Option<&str>,
        record_id: u16,
        factory: RecordFactory,
    ) -> Result<()> {
        let key = Key {
            user_id: user_id.map(String::from),
            record_id,
        };
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(|err| err.into_inner());
        if factories.contains_key(&key) {
            return Err(Error::ProcessorExists {
                user_id: key.user_id,
                record_id,
            });
        }
        factories.insert(key, factory);
        Ok(())
    }

    /// Parses a raw VLR's payload through the registered factories.
    ///
    /// An exact `(user id, record id)` match wins over a record id wildcard;
    /// if neither is registered the payload passes through untouched as
    /// [Record::Unknown].
    pub fn process(&self, raw: &RawVlr) -> Result<Record> {
        use crate::utils::AsLasStr;

        let user_id = raw.user_id.as_ref().as_las_str()?.to_string();
        let factories = self.factories.read().unwrap_or_else(|err| err.into_inner());
        let factory = factories
            .get(&Key {
                user_id: Some(user_id),
                record_id: raw.record_id,
            })
            .or_else(|| {
                factories.get(&Key {
                    user_id: None,
                    record_id: raw.record_id,
                })
            });
        match factory {
            Some(factory) => factory(raw),
            None => Ok(Record::Unknown(raw.data.clone())),
        }
    }
}

impl Default for Registry {
    fn default() -> Registry {
        Registry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::FromLasStr;

    fn raw_vlr(user_id: &str, record_id: u16, data: Vec<u8>) -> RawVlr {
        let mut raw = RawVlr {
            record_id,
            record_length_after_header: crate::vlr::RecordLength::Vlr(data.len() as u16),
            data,
            ..Default::default()
        };
        raw.user_id.as_mut().from_las_str(user_id).unwrap();
        raw
    }

    #[test]
    fn unknown_passthrough() {
        let registry = Registry::empty();
        let raw = raw_vlr("NoSuchUser", 17, vec![1, 2, 3]);
        assert_eq!(
            Record::Unknown(vec![1, 2, 3]),
            registry.process(&raw).unwrap()
        );
    }

    #[test]
    fn exact_match_beats_wildcard() {
        let registry = Registry::empty();
        registry.register(None, 100, |raw| Ok(Record::Unknown(raw.data.clone())));
        registry.register(Some("MyCompany"), 100, |_| Ok(Record::Superseded));

        let raw = raw_vlr("MyCompany", 100, vec![42]);
        assert_eq!(Record::Superseded, registry.process(&raw).unwrap());

        let raw = raw_vlr("OtherCompany", 100, vec![42]);
        assert_eq!(Record::Unknown(vec![42]), registry.process(&raw).unwrap());
    }

    #[test]
    fn try_register_does_not_clobber() {
        let registry = Registry::empty();
        registry.register(Some("MyCompany"), 42, |_| Ok(Record::Superseded));
        assert!(
            registry
                .try_register(Some("MyCompany"), 42, |raw| {
                    Ok(Record::Unknown(raw.data.clone()))
                })
                .is_err()
        );
        let raw = raw_vlr("MyCompany", 42, vec![1]);
        assert_eq!(Record::Superseded, registry.process(&raw).unwrap());
    }

    #[test]
    fn defaults_parse_known_records() {
        let registry = Registry::new();
        let raw = raw_vlr(
            LASF_PROJECTION,
            record_id::GEO_KEY_DIRECTORY,
            GeoKeyDirectory::default().to_bytes().unwrap(),
        );
        assert!(matches!(
            registry.process(&raw).unwrap(),
            Record::GeoKeyDirectory(_)
        ));

        let raw = raw_vlr(LASF_SPEC, record_id::SUPERSEDED, Vec::new());
        assert_eq!(Record::Superseded, registry.process(&raw).unwrap());
    }

    #[test]
    fn waveform_descriptors_are_wildcards() {
        let registry = Registry::new();
        let data = WaveformPacketDescriptor::default().to_bytes().unwrap();
        for record_id in [100, 200, 354] {
            let raw = raw_vlr("AnyVendor", record_id, data.clone());
            assert!(matches!(
                registry.process(&raw).unwrap(),
                Record::WaveformPacketDescriptor(_)
            ));
        }
        let raw = raw_vlr("AnyVendor", 355, data);
        assert!(matches!(
            registry.process(&raw).unwrap(),
            Record::Unknown(_)
        ));
    }
}
