//! SIA event code dictionary.
//!
//! Every two-letter code a panel may report, with its event type, a
//! description and what the numeric part of the message refers to
//! ("concerns"). Codes missing from the table are still accepted on the wire;
//! they simply have no dictionary entry.
//!
//! ```
//! use sia_protocol::codes;
//!
//! let entry = codes::lookup("BA").unwrap();
//! assert_eq!(entry.kind, "Burglary Alarm");
//! assert_eq!(entry.concerns, "Zone or point");
//!
//! assert!(codes::lookup("ZZ").is_none());
//! ```

use serde::Serialize;

/// One dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventCode {
    pub code: &'static str,
    /// Event type, e.g. `"Burglary Alarm"`.
    pub kind: &'static str,
    pub description: &'static str,
    /// What the number following the code identifies, e.g. a zone or a user.
    pub concerns: &'static str,
}

const fn code(
    code: &'static str,
    kind: &'static str,
    description: &'static str,
    concerns: &'static str,
) -> EventCode {
    EventCode {
        code,
        kind,
        description,
        concerns,
    }
}

/// Look up a code. Lookup is case-sensitive; codes are uppercase.
pub fn lookup(code: &str) -> Option<&'static EventCode> {
    CODES
        .binary_search_by(|entry| entry.code.cmp(code))
        .ok()
        .map(|index| &CODES[index])
}

/// All known codes, sorted by code.
pub fn all() -> &'static [EventCode] {
    CODES
}

static CODES: &[EventCode] = &[
    code(
        "AA",
        "Alarm - Panel Substitution",
        "An attempt to substitute an alternate alarm panel for a secure panel has been made",
        "Condition number",
    ),
    code("AB", "Abort", "An event message was not sent due to User action", "Zone or point"),
    code(
        "AN",
        "Analog Restoral",
        "An analog fire sensor has been restored to normal operation",
        "Zone or point",
    ),
    code("AR", "AC Restoral", "AC power has been restored", "Unused"),
    code(
        "AS",
        "Analog Service",
        "An analog fire sensor needs to be cleaned or calibrated",
        "Zone or point",
    ),
    code("AT", "AC Trouble", "AC power has been failed", "Unused"),
    code("BA", "Burglary Alarm", "Burglary zone has been violated while armed", "Zone or point"),
    code("BB", "Burglary Bypass", "Burglary zone has been bypassed", "Zone or point"),
    code("BC", "Burglary Cancel", "Alarm has been cancelled by authorized user", "User number"),
    code(
        "BD",
        "Swinger Trouble",
        "A non-fire zone has been violated after a Swinger Shutdown on the zone",
        "Zone or point",
    ),
    code(
        "BE",
        "Swinger Trouble Restore",
        "A non-fire zone restores to normal from a Swinger Trouble state",
        "Zone or point",
    ),
    code(
        "BG",
        "Unverified Event - Burglary",
        "A point assigned to a Cross Point group has gone into alarm but the Cross Point remained normal",
        "Zone or point",
    ),
    code("BH", "Burglary Alarm Restore", "Alarm condition eliminated", "Zone or point"),
    code("BJ", "Burglary Trouble Restore", "Trouble condition eliminated", "Zone or point"),
    code(
        "BM",
        "Burglary Alarm - Cross Point",
        "Burglary alarm w/cross point also in alarm - alarm verified",
        "Zone or point",
    ),
    code("BR", "Burglary Restoral", "Alarm/trouble condition has been eliminated", "Zone or point"),
    code(
        "BS",
        "Burglary Supervisory",
        "Unsafe intrusion detection system condition",
        "Zone or point",
    ),
    code("BT", "Burglary Trouble", "Burglary zone disabled by fault", "Zone or point"),
    code("BU", "Burglary Unbypass", "Zone bypass has been removed", "Zone or point"),
    code(
        "BV",
        "Burglary Verified",
        "A burglary alarm has occurred and been verified within programmed conditions. (zone or point not sent)",
        "Area number",
    ),
    code("BX", "Burglary Test", "Burglary zone activated during testing", "Zone or point"),
    code(
        "BZ",
        "Missing Supervision",
        "A non-fire Supervisory point has gone missing",
        "Zone or point",
    ),
    code("CA", "Automatic Closing", "System armed automatically", "Area number"),
    code(
        "CD",
        "Closing Delinquent",
        "The system has not been armed for a programmed amount of time",
        "Area number",
    ),
    code("CE", "Closing Extend", "Extend closing time", "User number"),
    code("CF", "Forced Closing", "System armed, some zones not ready", "User number"),
    code("CG", "Close Area", "System has been partially armed", "Area number"),
    code(
        "CI",
        "Fail to Close",
        "An area has not been armed at the end of the closing window",
        "Area number",
    ),
    code("CJ", "Late Close", "An area was armed after the closing window", "User number"),
    code("CK", "Early Close", "An area was armed before the closing window", "User number"),
    code("CL", "Closing Report", "System armed, normal", "User number"),
    code(
        "CM",
        "Missing Alarm - Recent Closing",
        "A point has gone missing within 2 minutes of closing",
        "Zone or point",
    ),
    code(
        "CO",
        "Command Sent",
        "A command has been sent to an expansion/peripheral device",
        "Condition number",
    ),
    code("CP", "Automatic Closing", "System armed automatically", "User number"),
    code("CQ", "Remote Closing", "The system was armed from a remote location", "User number"),
    code(
        "CR",
        "Recent Closing",
        "An alarm occurred within five minutes after the system was closed",
        "User number",
    ),
    code("CS", "Closing Keyswitch", "Account has been armed by keyswitch", "Zone or point"),
    code("CT", "Late to Open", "System was not disarmed on time", "Area number"),
    code(
        "CW",
        "Was Force Armed",
        "Header for a force armed session, forced point msgs may follow",
        "Area number",
    ),
    code(
        "CX",
        "Custom Function Executed",
        "The panel has executed a preprogrammed set of instructions",
        "Custom Function number",
    ),
    code(
        "CZ",
        "Point Closing",
        "A point, as opposed to a whole area or account, has closed",
        "Zone or point",
    ),
    code("DA", "Card Assigned", "An access ID has been added to the controller", "User number"),
    code("DB", "Card Deleted", "An access ID has been deleted from the controller", "User number"),
    code("DC", "Access Closed", "Access to all users prohibited", "Door number"),
    code("DD", "Access Denied", "Access denied, unknown code", "Door number"),
    code(
        "DE",
        "Request to Enter",
        "An access point was opened via a Request to Enter device",
        "Door number",
    ),
    code("DF", "Door Forced", "Door opened without access request", "Door number"),
    code("DG", "Access Granted", "Door access granted", "Door number"),
    code(
        "DH",
        "Door Left Open - Restoral",
        "An access point in a Door Left Open state has restored",
        "Door number",
    ),
    code(
        "DI",
        "Access Denied - Passback",
        "Access denied because credential has not exited area before attempting to re-enter same area",
        "Door number",
    ),
    code(
        "DJ",
        "Door Forced - Trouble",
        "An access point has been forced open in an unarmed area",
        "Door number",
    ),
    code("DK", "Access Lockout", "Access denied, known code", "Door number"),
    code(
        "DL",
        "Door Left Open - Alarm",
        "An open access point when open time expired in an armed area",
        "Door number",
    ),
    code(
        "DM",
        "Door Left Open - Trouble",
        "An open access point when open time expired in an unarmed area",
        "Door number",
    ),
    code(
        "DN",
        "Door Left Open (non-alarm, non-trouble)",
        "An access point was open when the door cycle time expired",
        "Door number",
    ),
    code("DO", "Access Open", "Access to authorized users allowed", "Door number"),
    code(
        "DP",
        "Access Denied - Unauthorized Time",
        "An access request was denied because the request is occurring outside the user's authorized time window(s)",
        "Door number",
    ),
    code(
        "DQ",
        "Access Denied - Unauthorized Arming State",
        "An access request was denied because the user was not authorized in this area when the area was armed",
        "Door number",
    ),
    code("DR", "Door Restoral", "Access alarm/trouble condition eliminated", "Door number"),
    code("DS", "Door Station", "Identifies door for next report", "Door number"),
    code("DT", "Access Trouble", "Access system trouble", "Unused"),
    code("DU", "Dealer ID", "Dealer ID number", "Dealer ID"),
    code(
        "DV",
        "Access Denied - Unauthorized Entry Level",
        "An access request was denied because the user is not authorized in this area",
        "Door number",
    ),
    code(
        "DW",
        "Access Denied - Interlock",
        "An access request was denied because the doors associated Interlock point is open",
        "Door number",
    ),
    code(
        "DX",
        "Request to Exit",
        "An access point was opened via a Request to Exit device",
        "Door number",
    ),
    code("DY", "Door Locked", "The door's lock has been engaged", "Door number"),
    code(
        "DZ",
        "Access Denied - Door Secured",
        "An access request was denied because the door has been placed in an Access Closed state",
        "Door number",
    ),
    code(
        "EA",
        "Exit Alarm",
        "An exit zone remained violated at the end of the exit delay period",
        "Zone or point",
    ),
    code(
        "EE",
        "Exit Error",
        "An exit zone remained violated at the end of the exit delay period",
        "User number",
    ),
    code(
        "EJ",
        "Expansion Tamper Restore",
        "Expansion device tamper restoral",
        "Expansion device number",
    ),
    code("EM", "Expansion Device Missing", "Expansion device missing", "Expansion device number"),
    code(
        "EN",
        "Expansion Missing Restore",
        "Expansion device communications re-established",
        "Expansion device number",
    ),
    code("ER", "Expansion Restoral", "Expansion device trouble eliminated", "Expander number"),
    code(
        "ES",
        "Expansion Device Tamper",
        "Expansion device enclosure tamper",
        "Expansion device number",
    ),
    code("ET", "Expansion Trouble", "Expansion device trouble", "Expander number"),
    code(
        "EX",
        "External Device Condition",
        "A specific reportable condition is detected on an external device",
        "Device number",
    ),
    code(
        "EZ",
        "Missing Alarm - Exit Error",
        "A point remained missing at the end of the exit delay period",
        "Point number",
    ),
    code("FA", "Fire Alarm", "Fire condition detected", "Zone or point"),
    code("FB", "Fire Bypass", "Zone has been bypassed", "Zone or point"),
    code(
        "FC",
        "Fire Cancel",
        "A Fire Alarm has been cancelled by an authorized person",
        "Zone or point",
    ),
    code(
        "FG",
        "Unverified Event - Fire",
        "A point assigned to a Cross Point group has gone into alarm but the Cross Point remained normal",
        "Zone or point",
    ),
    code("FH", "Fire Alarm Restore", "Alarm condition eliminated", "Zone or point"),
    code("FI", "Fire Test Begin", "The transmitter area's fire test has begun", "Area number"),
    code("FJ", "Fire Trouble Restore", "Trouble condition eliminated", "Zone or point"),
    code("FK", "Fire Test End", "The transmitter area's fire test has ended", "Area number"),
    code(
        "FL",
        "Fire Alarm Silenced",
        "The fire panel's sounder was silenced by command",
        "Zone or point",
    ),
    code(
        "FM",
        "Fire Alarm - Cross Point",
        "Fire Alarm with Cross Point also in alarm verifying the Fire Alarm",
        "Point number",
    ),
    code(
        "FQ",
        "Fire Supervisory Trouble Restore",
        "A fire supervisory zone that was in trouble condition has now restored to normal",
        "Zone or point",
    ),
    code("FR", "Fire Restoral", "Alarm/trouble condition has been eliminated", "Zone or point"),
    code("FS", "Fire Supervisory", "Unsafe fire detection system condition", "Zone or point"),
    code("FT", "Fire Trouble", "Zone disabled by fault", "Zone or point"),
    code("FU", "Fire Unbypass", "Bypass has been removed", "Zone or point"),
    code(
        "FV",
        "Fire Supervision Restore",
        "A fire supervision zone that was in alarm has restored to normal",
        "Zone or point",
    ),
    code(
        "FW",
        "Fire Supervisory Trouble",
        "A fire supervisory zone is now in a trouble condition",
        "Zone or point",
    ),
    code("FX", "Fire Test", "Fire zone activated during test", "Zone or point"),
    code("FY", "Missing Fire Trouble", "A fire point is now logically missing", "Zone or point"),
    code(
        "FZ",
        "Missing Fire Supervision",
        "A Fire Supervisory point has gone missing",
        "Zone or point",
    ),
    code("GA", "Gas Alarm", "Gas alarm condition detected", "Zone or point"),
    code("GB", "Gas Bypass", "Zone has been bypassed", "Zone or point"),
    code("GH", "Gas Alarm Restore", "Alarm condition eliminated", "Zone or point"),
    code("GJ", "Gas Trouble Restore", "Trouble condition eliminated", "Zone or point"),
    code("GR", "Gas Restoral", "Alarm/trouble condition has been eliminated", "Zone or point"),
    code("GS", "Gas Supervisory", "Unsafe gas detection system condition", "Zone or point"),
    code("GT", "Gas Trouble", "Zone disabled by fault", "Zone or point"),
    code("GU", "Gas Unbypass", "Bypass has been removed", "Zone or point"),
    code("GX", "Gas Test", "Zone activated during test", "Zone or point"),
    code("HA", "Holdup Alarm", "Silent alarm, user under duress", "Zone or point"),
    code("HB", "Holdup Bypass", "Zone has been bypassed", "Zone or point"),
    code("HH", "Holdup Alarm Restore", "Alarm condition eliminated", "Zone or point"),
    code("HJ", "Holdup Trouble Restore", "Trouble condition eliminated", "Zone or point"),
    code("HR", "Holdup Restoral", "Alarm/trouble condition has been eliminated", "Zone or point"),
    code("HS", "Holdup Supervisory", "Unsafe holdup system condition", "Zone or point"),
    code("HT", "Holdup Trouble", "Zone disabled by fault", "Zone or point"),
    code("HU", "Holdup Unbypass", "Bypass has been removed", "Zone or point"),
    code(
        "IA",
        "Equipment Failure Condition",
        "A specific, reportable condition is detected on a device",
        "Point number",
    ),
    code(
        "IR",
        "Equipment Fail - Restoral",
        "The equipment condition has been restored to normal",
        "Point number",
    ),
    code(
        "JA",
        "User code Tamper",
        "Too many unsuccessful attempts have been made to enter a user ID",
        "Area number",
    ),
    code("JD", "Date Changed", "The date was changed in the transmitter/receiver", "User number"),
    code(
        "JH",
        "Holiday Changed",
        "The transmitter's holiday schedule has been changed",
        "User number",
    ),
    code(
        "JK",
        "Latchkey Alert",
        "A designated user passcode has not been entered during a scheduled time window",
        "User number",
    ),
    code(
        "JL",
        "Log Threshold",
        "The transmitter's log memory has reached its threshold level",
        "Unused",
    ),
    code("JO", "Log Overflow", "The transmitter's log memory has overflowed", "Unused"),
    code(
        "JP",
        "User On Premises",
        "A designated user passcode has been used to gain access to the premises.",
        "User number",
    ),
    code("JR", "Schedule Executed", "An automatic scheduled event was executed", "Area number"),
    code("JS", "Schedule Changed", "An automatic schedule was changed", "User number"),
    code("JT", "Time Changed", "The time was changed in the transmitter/receiver", "User number"),
    code("JV", "User code Changed", "A user's code has been changed", "User number"),
    code("JX", "User code Deleted", "A user's code has been removed", "User number"),
    code("JY", "User code Added", "A user's code has been added", "User number"),
    code("JZ", "User Level Set", "A user's authority level has been set", "User number"),
    code("KA", "Heat Alarm", "High temperature detected on premise", "Zone or point"),
    code("KB", "Heat Bypass", "Zone has been bypassed", "Zone or point"),
    code("KH", "Heat Alarm Restore", "Alarm condition eliminated", "Zone or point"),
    code("KJ", "Heat Trouble Restore", "Trouble condition eliminated", "Zone or point"),
    code("KR", "Heat Restoral", "Alarm/trouble condition has been eliminated", "Zone or point"),
    code("KS", "Heat Supervisory", "Unsafe heat detection system condition", "Zone or point"),
    code("KT", "Heat Trouble", "Zone disabled by fault", "Zone or point"),
    code("KU", "Heat Unbypass", "Bypass has been removed", "Zone or point"),
    code("LB", "Local Program", "Begin local programming", "Unused"),
    code("LD", "Local Program Denied", "Access code incorrect", "Unused"),
    code("LE", "Listen-in Ended", "The listen-in session has been terminated", "Unused"),
    code("LF", "Listen-in Begin", "The listen-in session with the RECEIVER has begun", "Unused"),
    code("LR", "Phone Line Restoral", "Phone line restored to service", "Line number"),
    code("LS", "Local Program Success", "Local programming successful", "Unused"),
    code("LT", "Phone Line Trouble", "Phone line trouble report", "Line number"),
    code("LU", "Local Program Fail", "Local programming unsuccessful", "Unused"),
    code(
        "LX",
        "Local Programming Ended",
        "A local programming session has been terminated",
        "Unused",
    ),
    code("MA", "Medical Alarm", "Emergency assistance request", "Zone or point"),
    code("MB", "Medical Bypass", "Zone has been bypassed", "Zone or point"),
    code("MH", "Medical Alarm Restore", "Alarm condition eliminated", "Zone or point"),
    code("MI", "Message", "A canned message is being sent", "Message number"),
    code("MJ", "Medical Trouble Restore", "Trouble condition eliminated", "Zone or point"),
    code("MR", "Medical Restoral", "Alarm/trouble condition has been eliminated", "Zone or point"),
    code("MS", "Medical Supervisory", "Unsafe system condition exists", "Zone or point"),
    code("MT", "Medical Trouble", "Zone disabled by fault", "Zone or point"),
    code("MU", "Medical Unbypass", "Bypass has been removed", "Zone or point"),
    code(
        "NA",
        "No Activity",
        "There has been no zone activity for a programmed amount of time",
        "Zone number",
    ),
    code(
        "NC",
        "Network Condition",
        "A communications network has a specific reportable condition",
        "Network number",
    ),
    code("NF", "Forced Perimeter Arm", "Some zones/points not ready", "Area number"),
    code("NL", "Perimeter Armed", "An area has been perimeter armed", "Area number"),
    code(
        "NM",
        "Perimeter Armed, User Defined",
        "A user defined area has been perimeter armed",
        "Area number",
    ),
    code(
        "NR",
        "Network Restoral",
        "A communications network has returned to normal operation",
        "Network number",
    ),
    code("NS", "Activity Resumed", "A zone has detected activity after an alert", "Zone number"),
    code("NT", "Network Failure", "A communications network has failed", "Network number"),
    code("OA", "Automatic Opening", "System has disarmed automatically", "Area number"),
    code("OC", "Cancel Report", "Untyped zone cancel", "User number"),
    code("OG", "Open Area", "System has been partially disarmed", "Area number"),
    code(
        "OH",
        "Early to Open from Alarm",
        "An area in alarm was disarmed before the opening window",
        "User number",
    ),
    code(
        "OI",
        "Fail to Open",
        "An area has not been armed at the end of the opening window",
        "Area number",
    ),
    code("OJ", "Late Open", "An area was disarmed after the opening window", "User number"),
    code("OK", "Early Open", "An area was disarmed before the opening window", "User number"),
    code(
        "OL",
        "Late to Open from Alarm",
        "An area in alarm was disarmed after the opening window",
        "User number",
    ),
    code("OP", "Opening Report", "Account was disarmed", "User number"),
    code("OQ", "Remote Opening", "The system was disarmed from a remote location", "User number"),
    code("OR", "Disarm From Alarm", "Account in alarm was reset/disarmed", "User number"),
    code("OS", "Opening Keyswitch", "Account has been disarmed by keyswitch", "Zone or point"),
    code("OT", "Late To Close", "System was not armed on time", "User number"),
    code(
        "OU",
        "Output State - Trouble",
        "An output on a peripheral device or NAC is not functioning",
        "Output number",
    ),
    code(
        "OV",
        "Output State - Restore",
        "An output on a peripheral device or NAC is back to normal operation",
        "Output number",
    ),
    code(
        "OZ",
        "Point Opening",
        "A point, rather than a full area or account, disarmed",
        "Zone or point",
    ),
    code("PA", "Panic Alarm", "Emergency assistance request, manually activated", "Zone or point"),
    code("PB", "Panic Bypass", "Panic zone has been bypassed", "Zone or point"),
    code("PH", "Panic Alarm Restore", "Alarm condition eliminated", "Zone or point"),
    code("PJ", "Panic Trouble Restore", "Trouble condition eliminated", "Zone or point"),
    code("PR", "Panic Restoral", "Alarm/trouble condition has been eliminated", "Zone or point"),
    code("PS", "Panic Supervisory", "Unsafe system condition exists", "Zone or point"),
    code("PT", "Panic Trouble", "Zone disabled by fault", "Zone or point"),
    code("PU", "Panic Unbypass", "Panic zone bypass has been removed", "Zone or point"),
    code("QA", "Emergency Alarm", "Emergency assistance request", "Zone or point"),
    code("QB", "Emergency Bypass", "Zone has been bypassed", "Zone or point"),
    code("QH", "Emergency Alarm Restore", "Alarm condition has been eliminated", "Zone or point"),
    code(
        "QJ",
        "Emergency Trouble Restore",
        "Trouble condition has been eliminated",
        "Zone or point",
    ),
    code(
        "QR",
        "Emergency Restoral",
        "Alarm/trouble condition has been eliminated",
        "Zone or point",
    ),
    code("QS", "Emergency Supervisory", "Unsafe system condition exists", "Zone or point"),
    code("QT", "Emergency Trouble", "Zone disabled by fault", "Zone or point"),
    code("QU", "Emergency Unbypass", "Bypass has been removed", "Zone or point"),
    code(
        "RA",
        "Remote Programmer Call Failed",
        "Transmitter failed to communicate with the remote programmer",
        "Unused",
    ),
    code("RB", "Remote Program Begin", "Remote programming session initiated", "Unused"),
    code("RC", "Relay Close", "A relay has energized", "Relay number"),
    code("RD", "Remote Program Denied", "Access passcode incorrect", "Unused"),
    code("RN", "Remote Reset", "A TRANSMITTER was reset via a remote programmer", "Unused"),
    code("RO", "Relay Open", "A relay has de-energized", "Relay number"),
    code("RP", "Automatic Test", "Automatic communication test report", "Unused"),
    code("RR", "Power Up", "System lost power, is now restored", "Unused"),
    code("RS", "Remote Program Success", "Remote programming successful", "Unused"),
    code("RT", "Data Lost", "Dialer data lost, transmission error", "Line number"),
    code("RU", "Remote Program Fail", "Remote programming unsuccessful", "Unused"),
    code("RX", "Manual Test", "Manual communication test report", "User number"),
    code(
        "RY",
        "Test Off Normal",
        "Test signal(s) indicates abnormal condition(s) exist",
        "Zone or point",
    ),
    code("SA", "Sprinkler Alarm", "Sprinkler flow condition exists", "Zone or point"),
    code("SB", "Sprinkler Bypass", "Sprinkler zone has been bypassed", "Zone or point"),
    code(
        "SC",
        "Change of State",
        "An expansion/peripheral device is reporting a new condition or state change",
        "Condition number",
    ),
    code("SH", "Sprinkler Alarm Restore", "Alarm condition eliminated", "Zone or point"),
    code("SJ", "Sprinkler Trouble Restore", "Trouble condition eliminated", "Zone or point"),
    code(
        "SR",
        "Sprinkler Restoral",
        "Alarm/trouble condition has been eliminated",
        "Zone or point",
    ),
    code("SS", "Sprinkler Supervisory", "Unsafe sprinkler system condition", "Zone or point"),
    code("ST", "Sprinkler Trouble", "Zone disabled by fault", "Zone or point"),
    code("SU", "Sprinkler Unbypass", "Sprinkler zone bypass has been removed", "Zone or point"),
    code("TA", "Tamper Alarm", "Alarm equipment enclosure opened", "Zone or point"),
    code("TB", "Tamper Bypass", "Tamper detection has been bypassed", "Zone or point"),
    code("TC", "All Points Tested", "All point tested", "Unused"),
    code("TE", "Test End", "Communicator restored to operation", "Unused"),
    code(
        "TH",
        "Tamper Alarm Restore",
        "An Expansion Device's tamper switch restores to normal from an Alarm state",
        "Unused",
    ),
    code(
        "TJ",
        "Tamper Trouble Restore",
        "An Expansion Device's tamper switch restores to normal from a Trouble state",
        "Unused",
    ),
    code("TP", "Walk Test Point", "This point was tested during a Walk Test", "Point number"),
    code("TR", "Tamper Restoral", "Alarm equipment enclosure has been closed", "Zone or point"),
    code("TS", "Test Start", "Communicator taken out of operation", "Unused"),
    code("TT", "Tamper Trouble", "Equipment enclosure opened in disarmed state", "Zone or point"),
    code("TU", "Tamper Unbypass", "Tamper detection bypass has been removed", "Zone or point"),
    code("TW", "Area Watch Start", "Area watch feature has been activated", "Unused"),
    code("TX", "Test Report", "An unspecified (manual or automatic) communicator test", "Unused"),
    code("TZ", "Area Watch End", "Area watch feature has been deactivated", "Unused"),
    code("UA", "Untyped Zone Alarm", "Alarm condition from zone of unknown type", "Zone or point"),
    code("UB", "Untyped Zone Bypass", "Zone of unknown type has been bypassed", "Zone or point"),
    code(
        "UG",
        "Unverified Event - Untyped",
        "A point assigned to a Cross Point group has gone into alarm but the Cross Point remained normal",
        "Zone or point",
    ),
    code("UH", "Untyped Alarm Restore", "Alarm condition eliminated", "Zone or point"),
    code("UJ", "Untyped Trouble Restore", "Trouble condition eliminated", "Zone or point"),
    code(
        "UR",
        "Untyped Zone Restoral",
        "Alarm/trouble condition eliminated from zone of unknown type",
        "Zone or point",
    ),
    code(
        "US",
        "Untyped Zone Supervisory",
        "Unsafe condition from zone of unknown type",
        "Zone or point",
    ),
    code(
        "UT",
        "Untyped Zone Trouble",
        "Trouble condition from zone of unknown type",
        "Zone or point",
    ),
    code(
        "UU",
        "Untyped Zone Unbypass",
        "Bypass on zone of unknown type has been removed",
        "Zone or point",
    ),
    code("UX", "Undefined", "An undefined alarm condition has occurred", "Unused"),
    code(
        "UY",
        "Untyped Missing Trouble",
        "A point or device which was not armed is now logically missing",
        "Zone or point",
    ),
    code(
        "UZ",
        "Untyped Missing Alarm",
        "A point or device which was armed is now logically missing",
        "Zone or point",
    ),
    code("VI", "Printer Paper In", "TRANSMITTER or RECEIVER paper in", "Printer number"),
    code("VO", "Printer Paper Out", "TRANSMITTER or RECEIVER paper out", "Printer number"),
    code("VR", "Printer Restore", "TRANSMITTER or RECEIVER trouble restored", "Printer number"),
    code("VT", "Printer Trouble", "TRANSMITTER or RECEIVER trouble", "Printer number"),
    code("VX", "Printer Test", "TRANSMITTER or RECEIVER test", "Printer number"),
    code("VY", "Printer Online", "RECEIVER'S printer is now online", "Unused"),
    code("VZ", "Printer Offline", "RECEIVER'S printer is now offline", "Unused"),
    code("WA", "Water Alarm", "Water detected at protected premises", "Zone or point"),
    code("WB", "Water Bypass", "Water detection has been bypassed", "Zone or point"),
    code("WH", "Water Alarm Restore", "Water alarm condition eliminated", "Zone or point"),
    code("WJ", "Water Trouble Restore", "Water trouble condition eliminated", "Zone or point"),
    code(
        "WR",
        "Water Restoral",
        "Water alarm/trouble condition has been eliminated",
        "Zone or point",
    ),
    code(
        "WS",
        "Water Supervisory",
        "Water unsafe water detection system condition",
        "Zone or point",
    ),
    code("WT", "Water Trouble", "Water zone disabled by fault", "Zone or point"),
    code("WU", "Water Unbypass", "Water detection bypass has been removed", "Zone or point"),
    code(
        "XA",
        "Extra Account Report",
        "CS RECEIVER has received an event from a non-existent account",
        "Unused",
    ),
    code(
        "XE",
        "Extra Point",
        "Panel has sensed an extra point not specified for this site",
        "Point number",
    ),
    code(
        "XF",
        "Extra RF Point",
        "Panel has sensed an extra RF point not specified for this site",
        "Point number",
    ),
    code(
        "XH",
        "RF Interference Restoral",
        "A radio device is no longer detecting RF Interference",
        "Receiver number",
    ),
    code("XI", "Sensor Reset", "A user has reset a sensor", "Zone or point"),
    code(
        "XJ",
        "RF Receiver Tamper Restoral",
        "A Tamper condition at a premises RF Receiver has been restored",
        "Receiver number",
    ),
    code(
        "XL",
        "Low Received Signal Strength",
        "The RF signal strength of a reported event is below minimum level",
        "Receiver number",
    ),
    code(
        "XM",
        "Missing Alarm - Cross Point",
        "Missing Alarm verified by Cross Point in Alarm (or missing)",
        "Zone or point",
    ),
    code("XQ", "RF Interference", "A radio device is detecting RF Interference", "Receiver number"),
    code("XR", "Transmitter Battery Restoral", "Low battery has been corrected", "Zone or point"),
    code(
        "XS",
        "RF Receiver Tamper",
        "A Tamper condition at a premises receiver is detected",
        "Receiver number",
    ),
    code(
        "XT",
        "Transmitter Battery Trouble",
        "Low battery in wireless transmitter",
        "Zone or point",
    ),
    code("XW", "Forced Point", "A point was forced out of the system at arm time", "Zone or point"),
    code("XX", "Fail to Test", "A specific test from a panel was not received", "Unused"),
    code(
        "YA",
        "Bell Fault",
        "A trouble condition has been detected on a Local Bell, Siren, or Annunciator",
        "Unused",
    ),
    code(
        "YB",
        "Busy Seconds",
        "Percent of time receiver's line card is on-line",
        "Line card number",
    ),
    code("YC", "Communications Fail", "RECEIVER and TRANSMITTER", "Unused"),
    code(
        "YD",
        "Receiver Line Card Trouble",
        "A line card identified by the passed address is in trouble",
        "Line card number",
    ),
    code(
        "YE",
        "Receiver Line Card Restored",
        "A line card identified by the passed address is restored",
        "Line card number",
    ),
    code("YF", "Parameter Checksum Fail", "System data corrupted", "Unused"),
    code("YG", "Parameter Changed", "A TRANSMITTER'S parameters have been changed", "Unused"),
    code(
        "YH",
        "Bell Restored",
        "A trouble condition has been restored on a Local Bell, Siren, or Annunciator",
        "Unused",
    ),
    code(
        "YI",
        "Overcurrent Trouble",
        "An Expansion Device has detected an overcurrent condition",
        "Unused",
    ),
    code(
        "YJ",
        "Overcurrent Restore",
        "An Expansion Device has restored from an overcurrent condition",
        "Unused",
    ),
    code(
        "YK",
        "Communications Restoral",
        "TRANSMITTER has resumed communication with a RECEIVER",
        "Unused",
    ),
    code("YM", "System Battery Missing", "TRANSMITTER/RECEIVER battery is missing", "Unused"),
    code("YN", "Invalid Report", "TRANSMITTER has sent a packet with invalid data", "Unused"),
    code(
        "YO",
        "Unknown Message",
        "An unknown message was received from automation or the printer",
        "Unused",
    ),
    code(
        "YP",
        "Power Supply Trouble",
        "TRANSMITTER/RECEIVER has a problem with the power supply",
        "Unused",
    ),
    code(
        "YQ",
        "Power Supply Restored",
        "TRANSMITTER'S/RECEIVER'S power supply has been restored",
        "Unused",
    ),
    code("YR", "System Battery Restoral", "Low battery has been corrected", "Unused"),
    code("YS", "Communications Trouble", "RECEIVER and TRANSMITTER", "Unused"),
    code("YT", "System Battery Trouble", "Low battery in control/communicator", "Unused"),
    code(
        "YU",
        "Diagnostic Error",
        "An expansion/peripheral device is reporting a diagnostic error",
        "Condition number",
    ),
    code("YW", "Watchdog Reset", "The TRANSMITTER created an internal reset", "Unused"),
    code("YX", "Service Required", "A TRANSMITTER/RECEIVER needs service", "Unused"),
    code(
        "YY",
        "Status Report",
        "This is a header for an account status report transmission",
        "Unused",
    ),
    code(
        "YZ",
        "Service Completed",
        "Required TRANSMITTER / RECEIVER service completed",
        "Mfr defined",
    ),
    code("ZA", "Freeze Alarm", "Low temperature detected at premises", "Zone or point"),
    code("ZB", "Freeze Bypass", "Low temperature detection has been bypassed", "Zone or point"),
    code("ZH", "Freeze Alarm Restore", "Alarm condition eliminated", "Zone or point"),
    code("ZJ", "Freeze Trouble Restore", "Trouble condition eliminated", "Zone or point"),
    code("ZR", "Freeze Restoral", "Alarm/trouble condition has been eliminated", "Zone or point"),
    code("ZS", "Freeze Supervisory", "Unsafe freeze detection system condition", "Zone or point"),
    code("ZT", "Freeze Trouble", "Zone disabled by fault", "Zone or point"),
    code("ZU", "Freeze Unbypass", "Low temperature detection bypass removed", "Zone or point"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        assert!(CODES.windows(2).all(|pair| pair[0].code < pair[1].code));
    }

    #[test]
    fn test_codes_are_two_uppercase_letters() {
        for entry in all() {
            assert_eq!(entry.code.len(), 2, "{}", entry.code);
            assert!(entry.code.chars().all(|c| c.is_ascii_uppercase()), "{}", entry.code);
        }
    }

    #[test]
    fn test_every_entry_is_found() {
        for entry in all() {
            assert_eq!(lookup(entry.code), Some(entry));
        }
    }

    #[test]
    fn test_table_size() {
        assert_eq!(all().len(), 305);
    }

    #[test]
    fn test_reaction_codes_are_known() {
        for code in [
            "BA", "TA", "BR", "CA", "CG", "CP", "CQ", "CF", "NL", "CL", "OA", "OG", "OP", "OQ",
            "OR", "GA", "GH", "WA", "WH", "RP", "YG",
        ] {
            assert!(lookup(code).is_some(), "{code} missing");
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup("ba").is_none());
        assert!(lookup("").is_none());
        assert!(lookup("BAA").is_none());
    }
}
