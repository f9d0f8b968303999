//! `SetBinaryState` SOAP call for the Belkin `basicevent` service.

use gohome_domain::power::PowerState;

/// Service identifier advertised by Wemo outlets.
pub const SERVICE_URN: &str = "urn:Belkin:service:basicevent:1";

/// Control endpoint of the `basicevent` service.
pub const CONTROL_PATH: &str = "/upnp/control/basicevent1";

/// `SOAPACTION` header value, quotes included.
#[must_use]
pub fn soap_action() -> String {
    format!("\"{SERVICE_URN}#SetBinaryState\"")
}

/// SOAP envelope asking the outlet to switch to `power`.
#[must_use]
pub fn set_binary_state(power: PowerState) -> String {
    let value = u8::from(power.is_on());
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
    <s:Body>
        <u:SetBinaryState xmlns:u="{SERVICE_URN}">
            <BinaryState>{value}</BinaryState>
        </u:SetBinaryState>
    </s:Body>
</s:Envelope>"#
    )
}
